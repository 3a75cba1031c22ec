//! Typed wrappers for the backend's REST endpoints.
//!
//! Thin by design: each wrapper names a path and the request/response types
//! and delegates dispatch, credential attachment, and error mapping to
//! [`crate::net::client`]. Recovery decisions stay with callers — a missing
//! preferences record falls back to defaults, a failed save surfaces inline,
//! and only the profile-sync path elevates a 401 to a forced sign-out.

#![allow(clippy::unused_async)]

use crate::net::client;
use crate::net::types::{
    ApiError, AuthPayload, ForgotPasswordRequest, LoginRequest, MeResponse, Preferences,
    ProfilePatch, RegisterRequest, ResetPasswordRequest, SocialSignInRequest, UserProfile,
    VerifyRegistrationRequest,
};
use crate::state::tokens::TokenStore;

/// `POST /api/auth/login` — credential issuance for email + password.
pub async fn login(
    tokens: &TokenStore,
    email: &str,
    password: &str,
) -> Result<AuthPayload, ApiError> {
    let body = LoginRequest {
        email: email.to_owned(),
        password: password.to_owned(),
    };
    client::post_json(tokens, "/api/auth/login", &body).await
}

/// `POST /api/auth/register` — create an account; verification follows.
pub async fn register(tokens: &TokenStore, request: &RegisterRequest) -> Result<(), ApiError> {
    client::post_empty(tokens, "/api/auth/register", request).await
}

/// `POST /api/auth/verify-registration` — exchange the emailed code for
/// first credentials.
pub async fn verify_registration(
    tokens: &TokenStore,
    email: &str,
    code: &str,
) -> Result<AuthPayload, ApiError> {
    let body = VerifyRegistrationRequest {
        email: email.to_owned(),
        code: code.to_owned(),
    };
    client::post_json(tokens, "/api/auth/verify-registration", &body).await
}

/// `POST /api/auth/social` — exchange a social provider token for
/// backend credentials.
pub async fn social_sign_in(
    tokens: &TokenStore,
    provider: &str,
    token: &str,
) -> Result<AuthPayload, ApiError> {
    let body = SocialSignInRequest {
        provider: provider.to_owned(),
        token: token.to_owned(),
    };
    client::post_json(tokens, "/api/auth/social", &body).await
}

/// `GET /api/auth/me` — the authoritative user record.
///
/// A 401 here is the canonical signal that the current credential is invalid.
pub async fn fetch_me(tokens: &TokenStore) -> Result<UserProfile, ApiError> {
    let response: MeResponse = client::get_json(tokens, "/api/auth/me").await?;
    Ok(response.user)
}

/// `POST /api/auth/logout` — fire-and-forget backend-side invalidation.
pub async fn logout(tokens: &TokenStore) -> Result<(), ApiError> {
    client::post_empty(tokens, "/api/auth/logout", &serde_json::json!({})).await
}

/// `POST /api/auth/forgot-password`.
pub async fn forgot_password(tokens: &TokenStore, email: &str) -> Result<(), ApiError> {
    let body = ForgotPasswordRequest {
        email: email.to_owned(),
    };
    client::post_empty(tokens, "/api/auth/forgot-password", &body).await
}

/// `POST /api/auth/reset-password`.
pub async fn reset_password(
    tokens: &TokenStore,
    token: &str,
    new_password: &str,
) -> Result<(), ApiError> {
    let body = ResetPasswordRequest {
        token: token.to_owned(),
        new_password: new_password.to_owned(),
    };
    client::post_empty(tokens, "/api/auth/reset-password", &body).await
}

/// `PATCH /api/users/me` — update profile fields; callers follow up with an
/// explicit profile refresh so derived state sees the authoritative record.
pub async fn update_profile(
    tokens: &TokenStore,
    patch: &ProfilePatch,
) -> Result<UserProfile, ApiError> {
    client::patch_json(tokens, "/api/users/me", patch).await
}

/// `GET /api/users/me/preferences` — may not exist until first saved;
/// callers treat failures as "no preferences yet" and use defaults.
pub async fn fetch_preferences(tokens: &TokenStore) -> Result<Preferences, ApiError> {
    client::get_json(tokens, "/api/users/me/preferences").await
}

/// `POST /api/users/me/avatar` — multipart upload; the transport sets the
/// content-type so the boundary survives.
#[cfg(feature = "hydrate")]
pub async fn upload_avatar(
    tokens: &TokenStore,
    form: web_sys::FormData,
) -> Result<UserProfile, ApiError> {
    client::post_form(tokens, "/api/users/me/avatar", form).await
}
