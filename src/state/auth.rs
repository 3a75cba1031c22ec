//! Derived authentication state.
//!
//! DESIGN
//! ======
//! Two independently-evolving inputs — the provider's session snapshot and
//! the fetched profile — never mutate each other. [`derive_auth_state`]
//! merges them (plus the token store) into the one [`AuthState`] the rest of
//! the client consumes, and is recomputed whenever either input changes.
//!
//! Derivation carries one deliberate side effect: it reconciles the token
//! store synchronously while computing, so any request issued right after a
//! recomputation already carries the new credential. The side effect is
//! idempotent — equal inputs produce equal state and no observable re-push.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::UserProfile;
use crate::state::session::{SessionSnapshot, SessionStatus};
use crate::state::tokens::TokenStore;

/// The single authentication value consumed everywhere else.
///
/// Invariants: `is_authenticated` implies `user` is present (a stub until the
/// authoritative fetch lands); `is_loading` implies not authenticated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub access_token: Option<String>,
    pub onboarding_status: Option<String>,
}

impl AuthState {
    /// Session provider still resolving.
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    /// Fully signed out.
    pub fn signed_out() -> Self {
        Self::default()
    }
}

/// Merge {snapshot, profile, token store} into one consistent [`AuthState`].
pub fn derive_auth_state(
    snapshot: &SessionSnapshot,
    profile: Option<&UserProfile>,
    tokens: &TokenStore,
) -> AuthState {
    match snapshot.status {
        SessionStatus::Loading => AuthState::loading(),
        SessionStatus::Unauthenticated => {
            tokens.set_access_token(None);
            AuthState::signed_out()
        }
        SessionStatus::Authenticated => {
            let access_token = match &snapshot.access_token {
                Some(token) => {
                    tokens.set_access_token(Some(token));
                    Some(token.clone())
                }
                // The window right after a reload: the provider has not
                // re-minted its token yet but the durable cookie may still
                // hold a valid one.
                None => {
                    let recovered = tokens.get_access_token();
                    if recovered.is_none() {
                        leptos::logging::warn!(
                            "authenticated session with no access token from any source"
                        );
                    }
                    recovered
                }
            };

            let user = profile
                .cloned()
                .unwrap_or_else(|| stub_user(snapshot));
            let onboarding_status = profile
                .and_then(|u| u.onboarding_status.clone())
                .or_else(|| snapshot.onboarding_status.clone());

            AuthState {
                user: Some(user),
                is_authenticated: true,
                is_loading: false,
                access_token,
                onboarding_status,
            }
        }
    }
}

/// Minimal user assembled from the snapshot's identity fields, so the UI has
/// something to render before the authoritative fetch resolves.
fn stub_user(snapshot: &SessionSnapshot) -> UserProfile {
    let (first_name, last_name) = split_name(snapshot.name.as_deref().unwrap_or(""));
    UserProfile {
        id: snapshot.session_user_id.clone().unwrap_or_default(),
        email: snapshot.email.clone().unwrap_or_default(),
        first_name,
        last_name,
        avatar_url: snapshot.avatar_url.clone(),
        role: String::new(),
        onboarding_status: snapshot.onboarding_status.clone(),
    }
}

/// Split a display name at the first space into first/last.
fn split_name(name: &str) -> (String, String) {
    match name.trim().split_once(' ') {
        Some((first, last)) => (first.to_owned(), last.trim().to_owned()),
        None => (name.trim().to_owned(), String::new()),
    }
}
