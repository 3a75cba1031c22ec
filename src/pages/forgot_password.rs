//! Forgot-password page: request a reset link by email.

use std::sync::Arc;

use leptos::prelude::*;

use crate::net::api;
use crate::state::tokens::TokenStore;

/// Request a password-reset email. Success swaps the form for a
/// confirmation note; failures surface inline.
#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let tokens = expect_context::<Arc<TokenStore>>();

    let email = RwSignal::new(String::new());
    let sent = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        error.set(None);

        let email_value = email.get();
        let tokens = Arc::clone(&tokens);

        leptos::task::spawn_local(async move {
            match api::forgot_password(&tokens, &email_value).await {
                Ok(()) => sent.set(true),
                Err(err) => error.set(Some(err.message)),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <h1>"Reset your password"</h1>
            {move || {
                if sent.get() {
                    view! {
                        <p>"If that address has an account, a reset link is on its way."</p>
                    }
                        .into_any()
                } else {
                    view! {
                        <div class="auth-page__form">
                            <label>
                                "Email"
                                <input
                                    type="email"
                                    prop:value=email
                                    on:input=move |ev| email.set(event_target_value(&ev))
                                />
                            </label>
                            {move || {
                                error
                                    .get()
                                    .map(|message| {
                                        view! { <p class="auth-page__error">{message}</p> }
                                    })
                            }}
                            <button
                                class="btn btn--primary"
                                disabled=move || busy.get()
                                on:click=on_submit.clone()
                            >
                                "Send reset link"
                            </button>
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
