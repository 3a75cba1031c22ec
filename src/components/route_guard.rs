//! Navigation guard keeping the current route consistent with auth state.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::auth::AuthState;
use crate::util::routes::{self, GuardAction};

/// Wraps the route tree and redirects whenever the current path and
/// [`AuthState`] disagree: unauthenticated users off protected pages
/// (carrying a return-to parameter), authenticated users off the sign-in and
/// sign-up pages. Takes no action while auth is still loading, so a slow
/// session resolve never causes redirect flicker.
#[component]
pub fn RouteGuard(children: Children) -> impl IntoView {
    let auth = expect_context::<Memo<AuthState>>();
    let location = use_location();
    let navigate = use_navigate();

    Effect::new(move || {
        let state = auth.get();
        let path = location.pathname.get();
        match routes::guard(&path, &state) {
            GuardAction::Stay => {}
            GuardAction::ToSignIn { return_to } => {
                navigate(&routes::sign_in_url(&return_to), NavigateOptions::default());
            }
            GuardAction::ToDashboard => {
                navigate("/dashboard", NavigateOptions::default());
            }
        }
    });

    children()
}
