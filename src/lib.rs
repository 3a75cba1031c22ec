//! # stride-client
//!
//! Leptos + WASM client for the Stride wellness-coaching product: marketing
//! pages, the authenticated dashboard, and the client side of the REST API.
//!
//! The heart of the crate is the authentication session & token
//! synchronization pipeline: the token store (`state::tokens`), the HTTP
//! client (`net::client`), the profile-sync coordinator (`state::session` +
//! `net::session_sync`), the derived auth state (`state::auth`), and the
//! route guard (`util::routes` + `components::route_guard`).

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered document.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(crate::app::App);
}
