//! Access-token store: the single source of truth for the credential that
//! outbound requests carry.
//!
//! DESIGN
//! ======
//! Two layers. The in-memory value answers every read synchronously; a
//! durable cookie mirror survives a full page reload. Reads reconcile memory
//! toward the cookie when memory is empty (lazy recovery, cached after the
//! first hit) — never the other direction, so a stale in-memory value cannot
//! resurrect a cookie another tab has cleared.
//!
//! The store is constructor-injected and shared as `Arc<TokenStore>` through
//! Leptos context rather than living in a global, so tests substitute a fake
//! durable layer.

#[cfg(test)]
#[path = "tokens_test.rs"]
mod tokens_test;

use std::sync::Mutex;

use crate::util::cookie;

/// Cookie holding the raw access token string.
pub const ACCESS_TOKEN_COOKIE: &str = "stride_access_token";

/// Durable lifetime matching the backend token validity (3 days).
pub const TOKEN_MAX_AGE_SECS: u32 = 3 * 24 * 60 * 60;

/// Persistence layer behind the in-memory token value.
pub trait DurableTokenStore: Send + Sync {
    fn read(&self) -> Option<String>;
    fn write(&self, token: &str);
    fn clear(&self);
}

/// Production durable layer: one cookie on the current document.
///
/// Stateless; every call goes through `document.cookie`, which is a no-op
/// outside the browser.
pub struct CookieTokenStore;

impl DurableTokenStore for CookieTokenStore {
    fn read(&self) -> Option<String> {
        cookie::read(ACCESS_TOKEN_COOKIE).filter(|t| !t.is_empty())
    }

    fn write(&self, token: &str) {
        cookie::write(ACCESS_TOKEN_COOKIE, token, TOKEN_MAX_AGE_SECS);
    }

    fn clear(&self) {
        cookie::delete(ACCESS_TOKEN_COOKIE);
    }
}

/// In-memory access token with a durable cookie mirror.
pub struct TokenStore {
    memory: Mutex<Option<String>>,
    durable: Box<dyn DurableTokenStore>,
}

impl TokenStore {
    pub fn new(durable: Box<dyn DurableTokenStore>) -> Self {
        Self {
            memory: Mutex::new(None),
            durable,
        }
    }

    /// Store backed by the browser cookie.
    pub fn browser() -> Self {
        Self::new(Box::new(CookieTokenStore))
    }

    /// Replace the current token. `Some` mirrors to the durable store with
    /// the full 3-day window; `None` deletes the durable entry. Never fails.
    pub fn set_access_token(&self, token: Option<&str>) {
        match token {
            Some(token) => {
                *self.lock_memory() = Some(token.to_owned());
                self.durable.write(token);
            }
            None => {
                *self.lock_memory() = None;
                self.durable.clear();
            }
        }
    }

    /// Current token, recovering from the durable store when memory is empty.
    ///
    /// Recovery is cached: after the first successful durable read, later
    /// calls are answered from memory. This is what lets the client resume
    /// authenticated requests immediately after a reload, before the session
    /// provider has re-established its snapshot.
    pub fn get_access_token(&self) -> Option<String> {
        let mut memory = self.lock_memory();
        if memory.is_none() {
            *memory = self.durable.read();
        }
        memory.clone()
    }

    pub fn has_token(&self) -> bool {
        self.get_access_token().is_some()
    }

    fn lock_memory(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // Single-threaded under WASM; recover the guard if a panic ever
        // poisoned the lock.
        self.memory
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
