//! Network layer: HTTP dispatch, typed endpoint wrappers, and the clients
//! that keep session state synchronized with the outside world.

pub mod api;
pub mod client;
pub mod session_provider;
pub mod session_sync;
pub mod types;
