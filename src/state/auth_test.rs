use std::sync::Mutex;

use super::*;
use crate::state::tokens::DurableTokenStore;

/// Plain in-memory durable layer for derivation tests.
#[derive(Default)]
struct MemoryDurable(Mutex<Option<String>>);

impl DurableTokenStore for &'static MemoryDurable {
    fn read(&self) -> Option<String> {
        self.0.lock().expect("durable lock").clone()
    }

    fn write(&self, token: &str) {
        *self.0.lock().expect("durable lock") = Some(token.to_owned());
    }

    fn clear(&self) {
        *self.0.lock().expect("durable lock") = None;
    }
}

fn empty_store() -> TokenStore {
    let durable: &'static MemoryDurable = Box::leak(Box::new(MemoryDurable::default()));
    TokenStore::new(Box::new(durable))
}

fn store_seeded(token: &str) -> TokenStore {
    let durable: &'static MemoryDurable =
        Box::leak(Box::new(MemoryDurable(Mutex::new(Some(token.to_owned())))));
    TokenStore::new(Box::new(durable))
}

fn authenticated_snapshot() -> SessionSnapshot {
    SessionSnapshot {
        status: SessionStatus::Authenticated,
        session_user_id: Some("u1".to_owned()),
        access_token: Some("tok123".to_owned()),
        onboarding_status: Some("pending".to_owned()),
        email: Some("ada@example.com".to_owned()),
        name: Some("Ada Lovelace".to_owned()),
        avatar_url: Some("https://cdn.example.com/a.png".to_owned()),
        ..SessionSnapshot::default()
    }
}

fn fetched_profile() -> UserProfile {
    UserProfile {
        id: "u1".to_owned(),
        email: "ada@example.com".to_owned(),
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        avatar_url: None,
        role: "member".to_owned(),
        onboarding_status: Some("completed".to_owned()),
    }
}

// =============================================================
// loading / unauthenticated
// =============================================================

#[test]
fn loading_snapshot_yields_loading_state() {
    let tokens = empty_store();
    let state = derive_auth_state(&SessionSnapshot::loading(), None, &tokens);

    assert!(state.is_loading);
    assert!(!state.is_authenticated);
    assert!(state.user.is_none());
    assert!(state.access_token.is_none());
}

#[test]
fn loading_state_does_not_touch_a_durable_token() {
    // A still-valid cookie keeps answering requests while the provider is
    // resolving (reload window).
    let tokens = store_seeded("tokXYZ");
    let state = derive_auth_state(&SessionSnapshot::loading(), None, &tokens);

    assert!(state.is_loading);
    assert_eq!(tokens.get_access_token(), Some("tokXYZ".to_owned()));
}

#[test]
fn unauthenticated_snapshot_clears_the_token_store() {
    let tokens = store_seeded("tokXYZ");
    let state = derive_auth_state(&SessionSnapshot::unauthenticated(), None, &tokens);

    assert!(!state.is_authenticated);
    assert!(state.user.is_none());
    assert_eq!(tokens.get_access_token(), None);
}

// =============================================================
// authenticated — token reconciliation
// =============================================================

#[test]
fn snapshot_token_is_pushed_into_the_store() {
    let tokens = empty_store();
    let state = derive_auth_state(&authenticated_snapshot(), None, &tokens);

    assert_eq!(state.access_token.as_deref(), Some("tok123"));
    // The very next read already carries the new credential.
    assert_eq!(tokens.get_access_token(), Some("tok123".to_owned()));
}

#[test]
fn missing_snapshot_token_falls_back_to_durable_recovery() {
    let tokens = store_seeded("tokXYZ");
    let mut snapshot = authenticated_snapshot();
    snapshot.access_token = None;

    let state = derive_auth_state(&snapshot, None, &tokens);

    assert!(state.is_authenticated);
    assert_eq!(state.access_token.as_deref(), Some("tokXYZ"));
}

#[test]
fn no_token_anywhere_still_authenticates() {
    let tokens = empty_store();
    let mut snapshot = authenticated_snapshot();
    snapshot.access_token = None;

    let state = derive_auth_state(&snapshot, None, &tokens);

    // Inconsistent but survivable: requests go out unauthenticated until a
    // token appears.
    assert!(state.is_authenticated);
    assert!(state.access_token.is_none());
    assert!(state.user.is_some());
}

// =============================================================
// authenticated — user resolution
// =============================================================

#[test]
fn fetched_profile_wins_over_the_stub() {
    let tokens = empty_store();
    let profile = fetched_profile();
    let state = derive_auth_state(&authenticated_snapshot(), Some(&profile), &tokens);

    assert_eq!(state.user, Some(profile));
    assert_eq!(state.onboarding_status.as_deref(), Some("completed"));
}

#[test]
fn stub_user_is_assembled_from_snapshot_identity_fields() {
    let tokens = empty_store();
    let state = derive_auth_state(&authenticated_snapshot(), None, &tokens);

    let user = state.user.expect("stub user");
    assert_eq!(user.id, "u1");
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.first_name, "Ada");
    assert_eq!(user.last_name, "Lovelace");
    assert_eq!(user.avatar_url.as_deref(), Some("https://cdn.example.com/a.png"));
}

#[test]
fn single_word_name_has_empty_last_name() {
    let tokens = empty_store();
    let mut snapshot = authenticated_snapshot();
    snapshot.name = Some("Ada".to_owned());

    let user = derive_auth_state(&snapshot, None, &tokens).user.expect("stub");
    assert_eq!(user.first_name, "Ada");
    assert_eq!(user.last_name, "");
}

#[test]
fn onboarding_status_falls_back_to_the_snapshot() {
    let tokens = empty_store();
    let state = derive_auth_state(&authenticated_snapshot(), None, &tokens);
    assert_eq!(state.onboarding_status.as_deref(), Some("pending"));
}

// =============================================================
// idempotency
// =============================================================

#[test]
fn derivation_is_idempotent_for_equal_inputs() {
    let tokens = empty_store();
    let snapshot = authenticated_snapshot();
    let profile = fetched_profile();

    let first = derive_auth_state(&snapshot, Some(&profile), &tokens);
    let second = derive_auth_state(&snapshot, Some(&profile), &tokens);

    assert_eq!(first, second);
    assert_eq!(tokens.get_access_token(), Some("tok123".to_owned()));
}

#[test]
fn authenticated_implies_user_and_loading_implies_not_authenticated() {
    let tokens = empty_store();

    let authed = derive_auth_state(&authenticated_snapshot(), None, &tokens);
    assert!(authed.is_authenticated && authed.user.is_some());

    let loading = derive_auth_state(&SessionSnapshot::loading(), None, &tokens);
    assert!(loading.is_loading && !loading.is_authenticated);
}
