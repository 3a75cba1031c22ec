//! HTTP dispatch with credential attachment and uniform error shape.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `UNKNOWN_ERROR` since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every failure becomes an [`ApiError`]:
//! * non-2xx with a parseable envelope error → its `code`/`message`/`details`
//! * non-2xx without one → generic `"request failed"` / `REQUEST_FAILED`
//! * request sent, no response → status 0, `NETWORK_ERROR`
//! * request not constructible → status 0, `UNKNOWN_ERROR`
//!
//! This layer never decides to sign anyone out; a 401 is returned like any
//! other error and only the profile-sync path elevates it.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::net::types::{ApiEnvelope, ApiError, ApiErrorBody, CODE_REQUEST_FAILED};
use crate::state::tokens::TokenStore;

/// Format the authorization header value for a bearer token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Decode a response body inside the standard envelope.
///
/// Pure so it can be tested without a transport: takes the status and raw
/// body text, returns the `data` payload or the mapped [`ApiError`].
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(error_from_body(status, body));
    }
    match serde_json::from_str::<ApiEnvelope<T>>(body) {
        Ok(envelope) if envelope.success => envelope
            .data
            .ok_or_else(|| ApiError::unknown("response envelope carried no data")),
        Ok(envelope) => Err(error_from_parts(status, envelope.error)),
        Err(err) => Err(ApiError::unknown(format!("unreadable response body: {err}"))),
    }
}

/// Like [`decode_envelope`] for endpoints whose success carries no payload.
pub fn decode_empty(status: u16, body: &str) -> Result<(), ApiError> {
    if !(200..300).contains(&status) {
        return Err(error_from_body(status, body));
    }
    match serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body) {
        Ok(envelope) if envelope.success => Ok(()),
        Ok(envelope) => Err(error_from_parts(status, envelope.error)),
        // Some fire-and-forget endpoints answer 204 with an empty body.
        Err(_) if body.trim().is_empty() => Ok(()),
        Err(err) => Err(ApiError::unknown(format!("unreadable response body: {err}"))),
    }
}

/// Map a non-2xx body to an [`ApiError`], using the envelope error when the
/// body parses and the generic fallback when it does not.
pub fn error_from_body(status: u16, body: &str) -> ApiError {
    let parsed = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body)
        .ok()
        .and_then(|envelope| envelope.error);
    error_from_parts(status, parsed)
}

fn error_from_parts(status: u16, error: Option<ApiErrorBody>) -> ApiError {
    match error {
        Some(body) => ApiError {
            message: body.message.unwrap_or_else(|| "request failed".to_owned()),
            status,
            code: body.code.unwrap_or_else(|| CODE_REQUEST_FAILED.to_owned()),
            details: body.details,
        },
        None => ApiError {
            message: "request failed".to_owned(),
            status,
            code: CODE_REQUEST_FAILED.to_owned(),
            details: None,
        },
    }
}

/// `GET` returning the envelope's `data`.
pub async fn get_json<T: DeserializeOwned>(tokens: &TokenStore, path: &str) -> Result<T, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = with_auth(gloo_net::http::Request::get(path), tokens)
            .build()
            .map_err(|e| ApiError::unknown(e.to_string()))?;
        let (status, body) = send(request).await?;
        decode_envelope(status, &body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (tokens, path);
        Err(ApiError::unknown("not available on server"))
    }
}

/// `POST` with a JSON body, returning the envelope's `data`.
pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    tokens: &TokenStore,
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = with_auth(gloo_net::http::Request::post(path), tokens)
            .json(body)
            .map_err(|e| ApiError::unknown(e.to_string()))?;
        let (status, body) = send(request).await?;
        decode_envelope(status, &body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (tokens, path, body);
        Err(ApiError::unknown("not available on server"))
    }
}

/// `POST` with a JSON body for endpoints whose success carries no payload.
pub async fn post_empty<B: Serialize>(
    tokens: &TokenStore,
    path: &str,
    body: &B,
) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = with_auth(gloo_net::http::Request::post(path), tokens)
            .json(body)
            .map_err(|e| ApiError::unknown(e.to_string()))?;
        let (status, body) = send(request).await?;
        decode_empty(status, &body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (tokens, path, body);
        Err(ApiError::unknown("not available on server"))
    }
}

/// `PATCH` with a JSON body, returning the envelope's `data`.
pub async fn patch_json<B: Serialize, T: DeserializeOwned>(
    tokens: &TokenStore,
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = with_auth(gloo_net::http::Request::patch(path), tokens)
            .json(body)
            .map_err(|e| ApiError::unknown(e.to_string()))?;
        let (status, body) = send(request).await?;
        decode_envelope(status, &body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (tokens, path, body);
        Err(ApiError::unknown("not available on server"))
    }
}

/// `POST` a multipart form.
///
/// No explicit content-type: the transport sets `multipart/form-data` with
/// its boundary, which an explicit header would break.
#[cfg(feature = "hydrate")]
pub async fn post_form<T: DeserializeOwned>(
    tokens: &TokenStore,
    path: &str,
    form: web_sys::FormData,
) -> Result<T, ApiError> {
    let request = with_auth(gloo_net::http::Request::post(path), tokens)
        .body(form)
        .map_err(|e| ApiError::unknown(e.to_string()))?;
    let (status, body) = send(request).await?;
    decode_envelope(status, &body)
}

/// Attach the current bearer token, when one exists.
#[cfg(feature = "hydrate")]
fn with_auth(
    builder: gloo_net::http::RequestBuilder,
    tokens: &TokenStore,
) -> gloo_net::http::RequestBuilder {
    match tokens.get_access_token() {
        Some(token) => builder.header("Authorization", &bearer(&token)),
        None => builder,
    }
}

/// Transmit and read the body, classifying transport failures.
#[cfg(feature = "hydrate")]
async fn send(request: gloo_net::http::Request) -> Result<(u16, String), ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::network(e.to_string()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::network(e.to_string()))?;
    Ok((status, body))
}
