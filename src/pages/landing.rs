//! Marketing landing page.

use leptos::prelude::*;

/// Public entry page with sign-in and sign-up calls to action.
#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <div class="landing-page">
            <h1>"Stride"</h1>
            <p>"Wellness coaching that keeps pace with your life."</p>
            <div class="landing-page__actions">
                <a href="/sign-up" class="btn btn--primary">
                    "Get started"
                </a>
                <a href="/sign-in" class="btn">
                    "Sign in"
                </a>
            </div>
        </div>
    }
}
