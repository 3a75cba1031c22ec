//! Client for the external session provider.
//!
//! The provider is an independent subsystem: it holds its own signed session
//! artifact, refreshes it on its own schedule, and exposes a snapshot of the
//! result. This module polls that snapshot into the session signal (through
//! [`session_sync::apply_snapshot`], which keeps token propagation
//! synchronous) and wraps the provider's imperative sign-in/terminate calls.
//!
//! Provider requests ride on the provider's own session cookie, not on this
//! client's bearer token, so they bypass `net::client`.

#![allow(clippy::unused_async)]

use std::sync::Arc;

use leptos::prelude::*;

use crate::net::session_sync;
use crate::net::types::{ApiError, UserProfile};
use crate::state::session::{ProfileSync, SessionSnapshot};
use crate::state::tokens::TokenStore;

#[cfg(feature = "hydrate")]
const POLL_INTERVAL_MS: u32 = 30_000;
#[cfg(feature = "hydrate")]
const MAX_BACKOFF_MS: u32 = 10_000;

/// Fetch the provider's current session snapshot.
pub async fn fetch_snapshot() -> Result<SessionSnapshot, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let response = gloo_net::http::Request::get("/session/state")
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;
        if !response.ok() {
            let body = response.text().await.unwrap_or_default();
            return Err(crate::net::client::error_from_body(response.status(), &body));
        }
        response
            .json::<SessionSnapshot>()
            .await
            .map_err(|e| ApiError::unknown(format!("unreadable session snapshot: {e}")))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::unknown("not available on server"))
    }
}

/// Establish a provider session from email + password credentials.
pub async fn sign_in_with_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({ "email": email, "password": password });
        post_provider("/session/sign-in", &body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password);
        Err(ApiError::unknown("not available on server"))
    }
}

/// Establish a provider session from a social provider's token.
pub async fn sign_in_with_social(provider: &str, token: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({ "provider": provider, "token": token });
        post_provider("/session/social", &body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (provider, token);
        Err(ApiError::unknown("not available on server"))
    }
}

/// Force-terminate the provider session (sign-out).
pub async fn terminate_session() -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        post_provider("/session/sign-out", &serde_json::json!({})).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::unknown("not available on server"))
    }
}

/// Fetch the snapshot once and push it through the sync pipeline.
///
/// Used right after an imperative sign-in so the UI does not wait out the
/// poll interval. Returns whether a snapshot was applied.
pub async fn refresh_now(
    session: RwSignal<SessionSnapshot>,
    sync: StoredValue<ProfileSync>,
    profile: RwSignal<Option<UserProfile>>,
    tokens: &Arc<TokenStore>,
) -> bool {
    match fetch_snapshot().await {
        Ok(snapshot) => {
            session_sync::apply_snapshot(session, snapshot, sync, profile, tokens);
            true
        }
        Err(err) => {
            leptos::logging::warn!("session snapshot fetch failed: {err}");
            false
        }
    }
}

/// Spawn the snapshot poll loop as a local async task.
#[cfg(feature = "hydrate")]
pub fn spawn_session_provider(
    session: RwSignal<SessionSnapshot>,
    sync: StoredValue<ProfileSync>,
    profile: RwSignal<Option<UserProfile>>,
    tokens: Arc<TokenStore>,
) {
    leptos::task::spawn_local(session_loop(session, sync, profile, tokens));
}

/// Poll loop with backoff on provider failures.
#[cfg(feature = "hydrate")]
async fn session_loop(
    session: RwSignal<SessionSnapshot>,
    sync: StoredValue<ProfileSync>,
    profile: RwSignal<Option<UserProfile>>,
    tokens: Arc<TokenStore>,
) {
    let mut backoff_ms: u32 = 1_000;

    loop {
        match fetch_snapshot().await {
            Ok(snapshot) => {
                backoff_ms = 1_000;
                // Unchanged snapshots are dropped here so steady-state polls
                // do not re-notify every subscriber.
                if session.get_untracked() != snapshot {
                    session_sync::apply_snapshot(session, snapshot, sync, profile, &tokens);
                }
                sleep_ms(POLL_INTERVAL_MS).await;
            }
            Err(err) => {
                leptos::logging::warn!("session provider poll failed: {err}");
                sleep_ms(backoff_ms).await;
                backoff_ms = (backoff_ms * 2).min(MAX_BACKOFF_MS);
            }
        }
    }
}

#[cfg(feature = "hydrate")]
async fn sleep_ms(ms: u32) {
    gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(ms))).await;
}

#[cfg(feature = "hydrate")]
async fn post_provider(path: &str, body: &serde_json::Value) -> Result<(), ApiError> {
    let request = gloo_net::http::Request::post(path)
        .json(body)
        .map_err(|e| ApiError::unknown(e.to_string()))?;
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::network(e.to_string()))?;
    if !response.ok() {
        let text = response.text().await.unwrap_or_default();
        return Err(crate::net::client::error_from_body(response.status(), &text));
    }
    Ok(())
}
