//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::route_guard::RouteGuard;
use crate::net::types::UserProfile;
use crate::pages::{
    dashboard::DashboardPage, forgot_password::ForgotPasswordPage, landing::LandingPage,
    sign_in::SignInPage, sign_up::SignUpPage,
};
use crate::state::auth::derive_auth_state;
use crate::state::session::{ProfileSync, SessionSnapshot};
use crate::state::tokens::TokenStore;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Owns the auth pipeline's shared state: the token store, the session
/// snapshot and fetched-profile signals, the profile-sync coordinator, and
/// the derived auth state. Everything is provided via context so pages and
/// the route guard consume one consistent view.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let tokens = Arc::new(TokenStore::browser());
    let session = RwSignal::new(SessionSnapshot::loading());
    let profile = RwSignal::new(None::<UserProfile>);
    let sync = StoredValue::new(ProfileSync::default());

    // The one AuthState everything consumes, recomputed whenever the
    // snapshot or the fetched profile changes.
    let auth = Memo::new({
        let tokens = Arc::clone(&tokens);
        move |_| derive_auth_state(&session.get(), profile.get().as_ref(), &tokens)
    });

    provide_context(Arc::clone(&tokens));
    provide_context(session);
    provide_context(profile);
    provide_context(sync);
    provide_context(auth);

    // Start observing the external session provider (browser only).
    #[cfg(feature = "hydrate")]
    crate::net::session_provider::spawn_session_provider(
        session,
        sync,
        profile,
        Arc::clone(&tokens),
    );

    view! {
        <Stylesheet id="leptos" href="/pkg/stride.css"/>
        <Title text="Stride"/>

        <Router>
            <RouteGuard>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=LandingPage/>
                    <Route path=StaticSegment("sign-in") view=SignInPage/>
                    <Route path=StaticSegment("sign-up") view=SignUpPage/>
                    <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                </Routes>
            </RouteGuard>
        </Router>
    }
}
