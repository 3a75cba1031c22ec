//! Session snapshot types and the profile-sync coordinator.
//!
//! DESIGN
//! ======
//! The external session provider owns the [`SessionSnapshot`]; this client
//! only reads it. [`ProfileSync`] is the state machine that watches snapshot
//! transitions and decides when the authoritative profile must be fetched,
//! when it must be cleared, and when a completed fetch is too stale to apply.
//! It returns [`SyncAction`] values instead of performing I/O itself, so the
//! transition rules are plain synchronous logic; `net::session_sync` executes
//! the actions.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::Deserialize;

/// Session lifecycle as reported by the external session provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Authenticated,
    Unauthenticated,
    /// The provider has not finished resolving; no other snapshot field is
    /// trustworthy yet.
    #[default]
    #[serde(other)]
    Loading,
}

/// The external session provider's current view of authentication state.
///
/// Produced and owned by the provider; never mutated here. Carries its own
/// token pair when the provider minted one, plus enough identity fields to
/// render a stub user before the authoritative profile arrives.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub session_user_id: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub onboarding_status: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

impl SessionSnapshot {
    pub fn loading() -> Self {
        Self::default()
    }

    pub fn unauthenticated() -> Self {
        Self {
            status: SessionStatus::Unauthenticated,
            ..Self::default()
        }
    }
}

/// What the executor must do after a snapshot observation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncAction {
    None,
    /// Logout detected: clear the profile on the next scheduler tick, never
    /// inline in the turn that observed the transition.
    ScheduleClear,
    /// New session identity: fetch the authoritative profile. `epoch` is the
    /// liveness tag a completion must present before its result may apply.
    Fetch { user_id: String, epoch: u64 },
}

/// Coordinator state: which session identity the profile was last fetched
/// for, and an epoch counter that stales out in-flight fetches whenever the
/// identity changes.
#[derive(Clone, Debug, Default)]
pub struct ProfileSync {
    last_status: SessionStatus,
    tracked_identity: Option<String>,
    epoch: u64,
}

impl ProfileSync {
    /// Observe the next snapshot and decide what has to happen.
    ///
    /// At most one `Fetch` is issued per distinct session identity: the
    /// identity is recorded as tracked before any fetch resolves, so rapid
    /// re-observations of the same snapshot stay quiet. A snapshot that is
    /// authenticated but carries no usable token is logged and skipped
    /// without tracking, so a later, complete snapshot still triggers the
    /// fetch.
    pub fn observe(&mut self, snapshot: &SessionSnapshot) -> SyncAction {
        let previous = self.last_status;
        self.last_status = snapshot.status;

        match snapshot.status {
            SessionStatus::Loading => SyncAction::None,
            SessionStatus::Unauthenticated => {
                if previous == SessionStatus::Authenticated {
                    self.tracked_identity = None;
                    self.epoch += 1;
                    SyncAction::ScheduleClear
                } else {
                    SyncAction::None
                }
            }
            SessionStatus::Authenticated => {
                let Some(user_id) = snapshot.session_user_id.clone() else {
                    leptos::logging::warn!("authenticated snapshot without a session user id");
                    return SyncAction::None;
                };
                if self.tracked_identity.as_deref() == Some(user_id.as_str()) {
                    return SyncAction::None;
                }
                if snapshot.access_token.as_deref().unwrap_or("").is_empty() {
                    leptos::logging::warn!(
                        "authenticated snapshot for {user_id} carries no access token; deferring profile fetch"
                    );
                    return SyncAction::None;
                }
                self.tracked_identity = Some(user_id.clone());
                self.epoch += 1;
                SyncAction::Fetch {
                    user_id,
                    epoch: self.epoch,
                }
            }
        }
    }

    /// Whether a fetch started under `epoch` may still apply its result.
    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    /// Epoch for an explicitly requested re-fetch (bypasses the identity
    /// guard; the refresh still stales out if the session moves on).
    pub fn current_epoch(&self) -> u64 {
        self.epoch
    }

    /// Forget the tracked identity and stale out everything in flight.
    /// Used when a fetch came back 401 and the session had to be terminated.
    pub fn invalidate(&mut self) {
        self.tracked_identity = None;
        self.epoch += 1;
    }

    pub fn tracked_identity(&self) -> Option<&str> {
        self.tracked_identity.as_deref()
    }
}
