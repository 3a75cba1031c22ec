//! Sign-in page: credential form against the external session provider.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::net::session_provider;
use crate::net::types::UserProfile;
use crate::state::session::{ProfileSync, SessionSnapshot};
use crate::state::tokens::TokenStore;

/// Email + password sign-in.
///
/// On success the session provider snapshot is refreshed immediately (no
/// waiting out the poll interval) and the user lands on `return_to` when the
/// route guard sent them here, otherwise on the dashboard. Failures surface
/// inline next to the form.
#[component]
pub fn SignInPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionSnapshot>>();
    let profile = expect_context::<RwSignal<Option<UserProfile>>>();
    let sync = expect_context::<StoredValue<ProfileSync>>();
    let tokens = expect_context::<Arc<TokenStore>>();
    let navigate = use_navigate();
    let query = use_query_map();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        error.set(None);

        let email_value = email.get();
        let password_value = password.get();
        let destination = query
            .get()
            .get("return_to")
            .unwrap_or_else(|| "/dashboard".to_owned());
        let tokens = Arc::clone(&tokens);
        let navigate = navigate.clone();

        leptos::task::spawn_local(async move {
            match session_provider::sign_in_with_credentials(&email_value, &password_value).await
            {
                Ok(()) => {
                    let _ = session_provider::refresh_now(session, sync, profile, &tokens).await;
                    navigate(&destination, NavigateOptions::default());
                }
                Err(err) => {
                    error.set(Some(err.message));
                }
            }
            busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <h1>"Sign in"</h1>
            <label>
                "Email"
                <input
                    type="email"
                    prop:value=email
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Password"
                <input
                    type="password"
                    prop:value=password
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
            </label>
            {move || {
                error.get().map(|message| view! { <p class="auth-page__error">{message}</p> })
            }}
            <button class="btn btn--primary" disabled=move || busy.get() on:click=on_submit>
                {move || if busy.get() { "Signing in..." } else { "Sign in" }}
            </button>
            <p class="auth-page__links">
                <a href="/forgot-password">"Forgot password?"</a>
                <a href="/sign-up">"Create an account"</a>
            </p>
        </div>
    }
}
