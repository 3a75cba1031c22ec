//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`tokens`, `session`, `auth`) so each piece of
//! the auth pipeline stays a small focused model: the token store owns the
//! credential, the session module owns snapshot observation, and the auth
//! module derives the single value everything else consumes.

pub mod auth;
pub mod session;
pub mod tokens;
