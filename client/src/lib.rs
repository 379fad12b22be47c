//! # evertrek-client
//!
//! Leptos + WASM front-end for the EverTrek trekking-booking site.
//!
//! The crate holds the session store and auth context, the data-fetching
//! hooks, the REST and routing clients, and the pages and components. It is
//! rendered on the server by the `evertrek` host (feature `ssr`) and hydrated
//! in the browser (feature `hydrate`).

pub mod app;
pub mod components;
pub mod config;
pub mod hooks;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and hydrate the server-rendered page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
