use serde_json::json;

use super::*;

// =============================================================
// Wire-name mapping
// =============================================================

#[test]
fn user_profile_reads_camel_case_fields() {
    let user: UserProfile = serde_json::from_value(json!({
        "id": "u-1",
        "email": "ada@example.com",
        "firstName": "Ada",
        "lastName": "Lovelace",
        "avatarUrl": "https://cdn.example.com/a.png",
        "role": "member",
        "onboardingStatus": "completed"
    }))
    .expect("profile");

    assert_eq!(user.first_name, "Ada");
    assert_eq!(user.avatar_url.as_deref(), Some("https://cdn.example.com/a.png"));
    assert_eq!(user.onboarding_status.as_deref(), Some("completed"));
}

#[test]
fn user_profile_tolerates_sparse_records() {
    let user: UserProfile = serde_json::from_value(json!({ "id": "u-1" })).expect("profile");
    assert_eq!(user.email, "");
    assert_eq!(user.onboarding_status, None);
}

#[test]
fn auth_payload_reads_tokens() {
    let payload: AuthPayload = serde_json::from_value(json!({
        "user": { "id": "u-1" },
        "accessToken": "tok123",
        "refreshToken": "ref456"
    }))
    .expect("payload");

    assert_eq!(payload.access_token, "tok123");
    assert_eq!(payload.refresh_token.as_deref(), Some("ref456"));
}

#[test]
fn envelope_meta_is_optional() {
    let envelope: ApiEnvelope<serde_json::Value> =
        serde_json::from_value(json!({ "success": true, "data": {} })).expect("envelope");
    assert!(envelope.success);
    assert!(envelope.meta.is_none());
}

// =============================================================
// Preferences
// =============================================================

#[test]
fn preferences_default_when_never_saved() {
    let prefs = Preferences::default();
    assert_eq!(prefs.timezone, "UTC");
    assert!(prefs.reminders_enabled);
    assert!(!prefs.weekly_digest);
}

#[test]
fn preferences_fill_missing_fields_from_default() {
    let prefs: Preferences =
        serde_json::from_value(json!({ "weeklyDigest": true })).expect("prefs");
    assert_eq!(prefs.timezone, "UTC");
    assert!(prefs.weekly_digest);
}
