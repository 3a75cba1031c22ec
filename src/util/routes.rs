//! Route classification and navigation guard decisions.
//!
//! DESIGN
//! ======
//! Classification is static: a path is `Protected`, `AuthOnly`, or `Public`
//! purely by prefix, with no reference to runtime state. The guard decision
//! combines a classification with the current [`AuthState`] and returns what
//! navigation (if any) should happen; the `RouteGuard` component executes it.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::state::auth::AuthState;

/// Path prefixes that require an authenticated user.
pub const PROTECTED_PREFIXES: &[&str] =
    &["/dashboard", "/sessions", "/habits", "/settings", "/onboarding"];

/// Path prefixes that only make sense for a signed-out visitor.
pub const AUTH_ONLY_PREFIXES: &[&str] =
    &["/sign-in", "/sign-up", "/forgot-password", "/reset-password"];

/// Static access class of a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteClass {
    Protected,
    AuthOnly,
    Public,
}

/// What the route guard should do for the current navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardAction {
    Stay,
    /// Redirect to the sign-in page, carrying the original path so the user
    /// lands back where they were headed after authenticating.
    ToSignIn { return_to: String },
    ToDashboard,
}

/// Classify a path against the fixed prefix lists.
pub fn classify(path: &str) -> RouteClass {
    if PROTECTED_PREFIXES.iter().any(|p| path_has_prefix(path, p)) {
        RouteClass::Protected
    } else if AUTH_ONLY_PREFIXES.iter().any(|p| path_has_prefix(path, p)) {
        RouteClass::AuthOnly
    } else {
        RouteClass::Public
    }
}

/// Decide the guard action for a path under the given auth state.
///
/// While auth is still resolving the guard never redirects, so a slow session
/// load does not bounce the user through `/sign-in` and back.
pub fn guard(path: &str, auth: &AuthState) -> GuardAction {
    if auth.is_loading {
        return GuardAction::Stay;
    }

    match classify(path) {
        RouteClass::Protected if !auth.is_authenticated => GuardAction::ToSignIn {
            return_to: path.to_owned(),
        },
        RouteClass::AuthOnly if auth.is_authenticated => GuardAction::ToDashboard,
        _ => onboarding_gate(auth),
    }
}

/// Policy hook for redirecting users with incomplete onboarding.
///
/// Deliberately inert: the activation condition for this redirect has not
/// been decided, so the hook stays wired into [`guard`] but always answers
/// [`GuardAction::Stay`].
pub fn onboarding_gate(_auth: &AuthState) -> GuardAction {
    GuardAction::Stay
}

/// Build the sign-in URL carrying the original path.
pub fn sign_in_url(return_to: &str) -> String {
    format!("/sign-in?return_to={}", urlencoding::encode(return_to))
}

/// Prefix match that respects path-segment boundaries, so `/dashboard`
/// matches `/dashboard/stats` but not `/dashboards`.
fn path_has_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}
