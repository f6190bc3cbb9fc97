//! # client
//!
//! Leptos + WASM frontend for the coding-flashcards tracker.
//!
//! Pages call thin async wrappers in [`net::api`], keep request state in
//! signals, and re-render. The review schedule itself is computed by the
//! server; nothing here decides which problem is due.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
