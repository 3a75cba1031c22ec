//! Wire types shared with the backend.
//!
//! Every endpoint responds inside the same envelope:
//! `{ success, data?, error?: { code, message, details? }, meta? }`.
//! Field names on the wire are camelCase.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Machine-readable code for a request that got no response.
pub const CODE_NETWORK_ERROR: &str = "NETWORK_ERROR";
/// Machine-readable code for a request that could not be constructed or sent.
pub const CODE_UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";
/// Fallback code for a non-2xx response without a parseable error payload.
pub const CODE_REQUEST_FAILED: &str = "REQUEST_FAILED";

/// Standard response envelope.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiErrorBody>,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

/// Error payload carried inside the envelope.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
    pub details: Option<serde_json::Value>,
}

/// Typed error for every API failure mode.
///
/// `status` is the HTTP status for service errors and `0` when no response
/// was received (`NETWORK_ERROR`) or the request never left (`UNKNOWN_ERROR`).
/// `details` carries optional structured field-level errors for forms.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message} ({code}, status {status})")]
pub struct ApiError {
    pub message: String,
    pub status: u16,
    pub code: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Request was sent but no response arrived.
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: 0,
            code: CODE_NETWORK_ERROR.to_owned(),
            details: None,
        }
    }

    /// Request could not even be constructed or dispatched.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: 0,
            code: CODE_UNKNOWN_ERROR.to_owned(),
            details: None,
        }
    }

    /// True when this error is the canonical invalid-credential signal.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// Authoritative user record from the backend.
///
/// Replaced wholesale on every successful fetch, never patched field-by-field
/// from session snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub onboarding_status: Option<String>,
}

/// Successful credential issuance (`login`, `register`, `social`).
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub user: UserProfile,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// `GET /api/auth/me` response body.
#[derive(Clone, Debug, Deserialize)]
pub struct MeResponse {
    pub user: UserProfile,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct VerifyRegistrationRequest {
    pub email: String,
    pub code: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct SocialSignInRequest {
    pub provider: String,
    pub token: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Per-user display preferences. Missing on the backend until first saved,
/// so reads fall back to this default instead of surfacing an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub timezone: String,
    pub reminders_enabled: bool,
    pub weekly_digest: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_owned(),
            reminders_enabled: true,
            weekly_digest: false,
        }
    }
}
