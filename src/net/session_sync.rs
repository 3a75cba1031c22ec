//! Executor for the profile-sync coordinator.
//!
//! [`crate::state::session::ProfileSync`] decides *what* must happen on each
//! snapshot; this module makes it happen against the signals: it pushes
//! tokens synchronously, spawns profile fetches as local tasks, defers the
//! logout clear by one scheduler tick, and elevates a 401 on the profile
//! fetch to a forced provider sign-out.

use std::sync::Arc;

use leptos::prelude::*;

use crate::net::api;
use crate::net::session_provider;
use crate::net::types::UserProfile;
use crate::state::session::{ProfileSync, SessionSnapshot, SessionStatus, SyncAction};
use crate::state::tokens::TokenStore;

/// Apply a fresh snapshot from the session provider.
///
/// The snapshot's token lands in the token store *before* anything else in
/// this turn, so a request issued immediately after the session signal
/// updates already carries the new credential. Runs synchronously except for
/// the spawned fetch / deferred clear.
pub fn apply_snapshot(
    session: RwSignal<SessionSnapshot>,
    snapshot: SessionSnapshot,
    sync: StoredValue<ProfileSync>,
    profile: RwSignal<Option<UserProfile>>,
    tokens: &Arc<TokenStore>,
) {
    if snapshot.status == SessionStatus::Authenticated {
        if let Some(token) = &snapshot.access_token {
            tokens.set_access_token(Some(token));
        }
    }

    let action = sync
        .try_update_value(|s| s.observe(&snapshot))
        .unwrap_or(SyncAction::None);
    session.set(snapshot);

    match action {
        SyncAction::None => {}
        SyncAction::ScheduleClear => schedule_profile_clear(profile),
        SyncAction::Fetch { user_id, epoch } => {
            leptos::logging::log!("session {user_id}: fetching profile");
            leptos::task::spawn_local(run_profile_fetch(
                epoch,
                sync,
                profile,
                Arc::clone(tokens),
            ));
        }
    }
}

/// Explicit re-fetch of the authoritative profile (e.g. after a profile
/// edit). Bypasses the identity guard; the result still stales out if the
/// session moves on before it lands.
pub fn refresh_user(
    sync: StoredValue<ProfileSync>,
    profile: RwSignal<Option<UserProfile>>,
    tokens: &Arc<TokenStore>,
) {
    let epoch = sync
        .try_with_value(ProfileSync::current_epoch)
        .unwrap_or_default();
    leptos::task::spawn_local(run_profile_fetch(epoch, sync, profile, Arc::clone(tokens)));
}

/// User-initiated sign-out: fire-and-forget backend logout, then terminate
/// the provider session. The resulting unauthenticated snapshot clears the
/// token and profile through the normal pipeline.
pub fn sign_out(tokens: &Arc<TokenStore>) {
    let tokens = Arc::clone(tokens);
    leptos::task::spawn_local(async move {
        if let Err(err) = api::logout(&tokens).await {
            leptos::logging::warn!("backend logout failed: {err}");
        }
        if let Err(err) = session_provider::terminate_session().await {
            leptos::logging::warn!("session termination failed: {err}");
        }
    });
}

async fn run_profile_fetch(
    epoch: u64,
    sync: StoredValue<ProfileSync>,
    profile: RwSignal<Option<UserProfile>>,
    tokens: Arc<TokenStore>,
) {
    let still_current = |sync: StoredValue<ProfileSync>| {
        sync.try_with_value(|s| s.is_current(epoch)).unwrap_or(false)
    };

    match api::fetch_me(&tokens).await {
        Ok(user) => {
            if still_current(sync) {
                // Wholesale replace, last completion wins.
                profile.set(Some(user));
            } else {
                leptos::logging::log!("discarding stale profile fetch");
            }
        }
        Err(err) if err.is_unauthorized() => {
            // The session's credential is invalid. Only act when this fetch
            // is still the session's fetch; a stale 401 must not kill a
            // newer session.
            if !still_current(sync) {
                return;
            }
            leptos::logging::warn!("credential rejected by /api/auth/me; terminating session");
            let _ = sync.try_update_value(ProfileSync::invalidate);
            tokens.set_access_token(None);
            profile.set(None);
            if let Err(err) = session_provider::terminate_session().await {
                leptos::logging::warn!("session termination failed: {err}");
            }
        }
        Err(err) => {
            // Keep whatever profile (or stub) is already showing.
            leptos::logging::warn!("profile fetch failed: {err}");
        }
    }
}

/// Clear the profile on the next tick, never inline in the turn that
/// observed the logout transition.
fn schedule_profile_clear(profile: RwSignal<Option<UserProfile>>) {
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            gloo_timers::future::sleep(std::time::Duration::ZERO).await;
            profile.set(None);
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        profile.set(None);
    }
}
