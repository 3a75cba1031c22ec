//! Authenticated dashboard page.
//!
//! Business widgets live elsewhere; this page exercises the auth pipeline:
//! the derived auth state for the greeting, preferences with
//! fall-back-to-default on failure, profile editing followed by an explicit
//! refresh, and sign-out.

use std::sync::Arc;

use leptos::prelude::*;

use crate::net::api;
use crate::net::session_sync;
use crate::net::types::{ProfilePatch, UserProfile};
use crate::state::auth::AuthState;
use crate::state::session::ProfileSync;
use crate::state::tokens::TokenStore;

/// Dashboard — greeting, onboarding status, preferences, profile controls.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<Memo<AuthState>>();
    let profile = expect_context::<RwSignal<Option<UserProfile>>>();
    let sync = expect_context::<StoredValue<ProfileSync>>();
    let tokens = expect_context::<Arc<TokenStore>>();

    // Preferences may not exist until first saved; treat any failure as the
    // expected empty state rather than an error.
    let preferences = LocalResource::new({
        let tokens = Arc::clone(&tokens);
        move || {
            let tokens = Arc::clone(&tokens);
            async move { api::fetch_preferences(&tokens).await.unwrap_or_default() }
        }
    });

    let first_name_edit = RwSignal::new(String::new());
    let save_error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let greeting = move || {
        let state = auth.get();
        match state.user {
            Some(user) if !user.first_name.is_empty() => format!("Welcome back, {}", user.first_name),
            Some(_) => "Welcome back".to_owned(),
            None => "Welcome".to_owned(),
        }
    };

    let onboarding = move || {
        auth.get()
            .onboarding_status
            .filter(|status| status != "completed")
            .map(|status| view! { <p class="dashboard-page__onboarding">{format!("Onboarding: {status}")}</p> })
    };

    let on_refresh = {
        let tokens = Arc::clone(&tokens);
        move |_| session_sync::refresh_user(sync, profile, &tokens)
    };

    let on_sign_out = {
        let tokens = Arc::clone(&tokens);
        move |_| session_sync::sign_out(&tokens)
    };

    let on_save_name = {
        let tokens = Arc::clone(&tokens);
        move |_| {
            if saving.get() {
                return;
            }
            saving.set(true);
            save_error.set(None);

            let patch = ProfilePatch {
                first_name: Some(first_name_edit.get()),
                ..ProfilePatch::default()
            };
            let tokens = Arc::clone(&tokens);

            leptos::task::spawn_local(async move {
                match api::update_profile(&tokens, &patch).await {
                    // Re-fetch so derived state sees the authoritative record.
                    Ok(_) => session_sync::refresh_user(sync, profile, &tokens),
                    Err(err) => save_error.set(Some(err.message)),
                }
                saving.set(false);
            });
        }
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>{greeting}</h1>
                <button class="btn" on:click=on_sign_out>
                    "Sign out"
                </button>
            </header>

            {onboarding}

            <section class="dashboard-page__profile">
                <h2>"Profile"</h2>
                <label>
                    "First name"
                    <input
                        prop:value=first_name_edit
                        on:input=move |ev| first_name_edit.set(event_target_value(&ev))
                    />
                </label>
                {move || {
                    save_error
                        .get()
                        .map(|message| view! { <p class="dashboard-page__error">{message}</p> })
                }}
                <button class="btn btn--primary" disabled=move || saving.get() on:click=on_save_name>
                    "Save"
                </button>
                <button class="btn" on:click=on_refresh>
                    "Refresh profile"
                </button>
            </section>

            <section class="dashboard-page__preferences">
                <h2>"Preferences"</h2>
                <Suspense fallback=move || view! { <p>"Loading preferences..."</p> }>
                    {move || {
                        preferences
                            .get()
                            .map(|prefs| {
                                view! {
                                    <ul>
                                        <li>{format!("Timezone: {}", prefs.timezone)}</li>
                                        <li>
                                            {format!(
                                                "Reminders: {}",
                                                if prefs.reminders_enabled { "on" } else { "off" },
                                            )}
                                        </li>
                                        <li>
                                            {format!(
                                                "Weekly digest: {}",
                                                if prefs.weekly_digest { "on" } else { "off" },
                                            )}
                                        </li>
                                    </ul>
                                }
                            })
                    }}
                </Suspense>
            </section>
        </div>
    }
}
