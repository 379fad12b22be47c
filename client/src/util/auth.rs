//! Shared auth routing helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes and the login page must agree on where a visitor is sent
//! and how they get back. The decision is a pure function of `AuthState` so
//! it can be tested without a router.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::state::auth::AuthState;
use crate::state::session::SESSION_KEYS;

pub const LOGIN_PATH: &str = "/login";

/// What a protected route renders for a given auth state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session check still running: show a neutral loading indicator.
    Pending,
    /// Not signed in: replace the location with this login URL.
    Redirect(String),
    /// Signed in: render the protected subtree.
    Allow,
}

/// Decide what a protected route shows.
///
/// Never redirects while `state.is_loading` is true.
pub fn guard_decision(state: AuthState, requested: &str) -> GuardDecision {
    if state.is_loading {
        GuardDecision::Pending
    } else if state.is_authenticated {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect(login_redirect_path(requested))
    }
}

/// Path plus query of the current location, as preserved in `next`.
///
/// Accepts `search` with or without its leading `?`.
pub fn requested_location(pathname: &str, search: &str) -> String {
    let query = search.trim_start_matches('?');
    if query.is_empty() { pathname.to_owned() } else { format!("{pathname}?{query}") }
}

/// Login URL carrying `requested` as the `next` parameter.
pub fn login_redirect_path(requested: &str) -> String {
    let next = safe_next_path(Some(requested));
    if next == "/" {
        LOGIN_PATH.to_owned()
    } else {
        format!("{LOGIN_PATH}?next={}", urlencoding::encode(&next))
    }
}

/// Validate a post-login destination.
///
/// Only local paths are honoured; external URLs, protocol-relative paths and
/// the login page itself fall back to `/`.
pub fn safe_next_path(raw: Option<&str>) -> String {
    let Some(path) = raw.map(str::trim).filter(|p| !p.is_empty()) else {
        return "/".to_owned();
    };
    let local = path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\");
    let is_login = path == LOGIN_PATH || path.starts_with(&format!("{LOGIN_PATH}?"));
    if local && !is_login { path.to_owned() } else { "/".to_owned() }
}

/// Whether a `storage` event key concerns the session.
///
/// `None` means the whole storage area was cleared.
pub fn is_session_storage_key(key: Option<&str>) -> bool {
    key.map_or(true, |k| SESSION_KEYS.contains(&k))
}

/// Keep `auth` in sync with session changes made in other tabs.
#[cfg(feature = "hydrate")]
pub fn install_storage_sync(auth: crate::state::AppAuth) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let Some(window) = web_sys::window() else {
        return;
    };
    let handler = Closure::<dyn Fn(web_sys::StorageEvent)>::new(move |ev: web_sys::StorageEvent| {
        if is_session_storage_key(ev.key().as_deref()) {
            auth.sync_from_storage();
        }
    });
    if window
        .add_event_listener_with_callback("storage", handler.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("could not listen for storage events; cross-tab sign-out disabled");
    }
    // Lives for the whole page.
    handler.forget();
}
