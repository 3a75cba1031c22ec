//! Shared UI components.

pub mod route_guard;
