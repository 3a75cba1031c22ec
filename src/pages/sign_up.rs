//! Sign-up page: account creation followed by email verification.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::api;
use crate::net::session_provider;
use crate::net::types::{RegisterRequest, UserProfile};
use crate::state::session::{ProfileSync, SessionSnapshot};
use crate::state::tokens::TokenStore;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Step {
    Details,
    Verify,
}

/// Two-step registration: details first, then the emailed verification code.
///
/// Verification returns the first credentials; the access token goes into
/// the token store straight away so the session provider's first
/// authenticated snapshot finds the profile fetch already authorized.
#[component]
pub fn SignUpPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionSnapshot>>();
    let profile = expect_context::<RwSignal<Option<UserProfile>>>();
    let sync = expect_context::<StoredValue<ProfileSync>>();
    let tokens = expect_context::<Arc<TokenStore>>();
    let navigate = use_navigate();

    let step = RwSignal::new(Step::Details);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let code = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_register = {
        let tokens = Arc::clone(&tokens);
        move |_| {
            if busy.get() {
                return;
            }
            busy.set(true);
            error.set(None);

            let request = RegisterRequest {
                email: email.get(),
                password: password.get(),
                first_name: first_name.get(),
                last_name: last_name.get(),
            };
            let tokens = Arc::clone(&tokens);

            leptos::task::spawn_local(async move {
                match api::register(&tokens, &request).await {
                    Ok(()) => step.set(Step::Verify),
                    Err(err) => error.set(Some(err.message)),
                }
                busy.set(false);
            });
        }
    };

    let on_verify = {
        let tokens = Arc::clone(&tokens);
        move |_| {
            if busy.get() {
                return;
            }
            busy.set(true);
            error.set(None);

            let email_value = email.get();
            let code_value = code.get();
            let tokens = Arc::clone(&tokens);
            let navigate = navigate.clone();

            leptos::task::spawn_local(async move {
                match api::verify_registration(&tokens, &email_value, &code_value).await {
                    Ok(payload) => {
                        tokens.set_access_token(Some(&payload.access_token));
                        let _ =
                            session_provider::refresh_now(session, sync, profile, &tokens).await;
                        navigate("/dashboard", NavigateOptions::default());
                    }
                    Err(err) => error.set(Some(err.message)),
                }
                busy.set(false);
            });
        }
    };

    view! {
        <div class="auth-page">
            <h1>"Create your account"</h1>
            {move || {
                error.get().map(|message| view! { <p class="auth-page__error">{message}</p> })
            }}
            {move || match step.get() {
                Step::Details => {
                    view! {
                        <div class="auth-page__form">
                            <label>
                                "First name"
                                <input
                                    prop:value=first_name
                                    on:input=move |ev| first_name.set(event_target_value(&ev))
                                />
                            </label>
                            <label>
                                "Last name"
                                <input
                                    prop:value=last_name
                                    on:input=move |ev| last_name.set(event_target_value(&ev))
                                />
                            </label>
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
                            <button
                                class="btn btn--primary"
                                disabled=move || busy.get()
                                on:click=on_register.clone()
                            >
                                "Sign up"
                            </button>
                        </div>
                    }
                        .into_any()
                }
                Step::Verify => {
                    view! {
                        <div class="auth-page__form">
                            <p>"We sent a verification code to your email."</p>
                            <label>
                                "Code"
                                <input
                                    prop:value=code
                                    on:input=move |ev| code.set(event_target_value(&ev))
                                />
                            </label>
                            <button
                                class="btn btn--primary"
                                disabled=move || busy.get()
                                on:click=on_verify.clone()
                            >
                                "Verify"
                            </button>
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
