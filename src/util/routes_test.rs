use super::*;
use crate::net::types::UserProfile;

fn authed() -> AuthState {
    AuthState {
        user: Some(UserProfile {
            id: "u-1".to_owned(),
            email: "coach@example.com".to_owned(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            avatar_url: None,
            role: "member".to_owned(),
            onboarding_status: Some("completed".to_owned()),
        }),
        is_authenticated: true,
        is_loading: false,
        access_token: Some("tok123".to_owned()),
        onboarding_status: Some("completed".to_owned()),
    }
}

// =============================================================
// classify
// =============================================================

#[test]
fn classify_protected_prefixes() {
    assert_eq!(classify("/dashboard"), RouteClass::Protected);
    assert_eq!(classify("/dashboard/stats"), RouteClass::Protected);
    assert_eq!(classify("/settings"), RouteClass::Protected);
    assert_eq!(classify("/onboarding"), RouteClass::Protected);
}

#[test]
fn classify_auth_only_prefixes() {
    assert_eq!(classify("/sign-in"), RouteClass::AuthOnly);
    assert_eq!(classify("/sign-up"), RouteClass::AuthOnly);
    assert_eq!(classify("/reset-password/abc"), RouteClass::AuthOnly);
}

#[test]
fn classify_public_by_default() {
    assert_eq!(classify("/"), RouteClass::Public);
    assert_eq!(classify("/pricing"), RouteClass::Public);
}

#[test]
fn classify_respects_segment_boundaries() {
    assert_eq!(classify("/dashboards"), RouteClass::Public);
    assert_eq!(classify("/sign-inbox"), RouteClass::Public);
}

// =============================================================
// guard
// =============================================================

#[test]
fn guard_takes_no_action_while_loading() {
    let auth = AuthState::loading();
    assert_eq!(guard("/dashboard", &auth), GuardAction::Stay);
    assert_eq!(guard("/sign-in", &auth), GuardAction::Stay);
}

#[test]
fn guard_redirects_unauthenticated_off_protected_routes() {
    let auth = AuthState::signed_out();
    assert_eq!(
        guard("/dashboard/stats", &auth),
        GuardAction::ToSignIn {
            return_to: "/dashboard/stats".to_owned()
        }
    );
}

#[test]
fn guard_redirects_authenticated_off_auth_only_routes() {
    assert_eq!(guard("/sign-in", &authed()), GuardAction::ToDashboard);
}

#[test]
fn guard_leaves_public_routes_alone() {
    assert_eq!(guard("/", &AuthState::signed_out()), GuardAction::Stay);
    assert_eq!(guard("/", &authed()), GuardAction::Stay);
}

#[test]
fn guard_allows_authenticated_users_on_protected_routes() {
    assert_eq!(guard("/dashboard", &authed()), GuardAction::Stay);
}

// =============================================================
// onboarding hook + sign-in URL
// =============================================================

#[test]
fn onboarding_gate_is_inert() {
    let mut auth = authed();
    auth.onboarding_status = Some("pending".to_owned());
    assert_eq!(onboarding_gate(&auth), GuardAction::Stay);
    assert_eq!(guard("/dashboard", &auth), GuardAction::Stay);
}

#[test]
fn sign_in_url_encodes_return_to() {
    assert_eq!(
        sign_in_url("/dashboard/stats?week=3"),
        "/sign-in?return_to=%2Fdashboard%2Fstats%3Fweek%3D3"
    );
}
