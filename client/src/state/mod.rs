//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` persists tokens, `auth` owns the sign-in lifecycle on top of it,
//! and `fetch` holds the per-hook request bookkeeping used by `hooks`.

pub mod auth;
pub mod fetch;
pub mod session;

use crate::net::api::ApiClient;
use crate::util::storage::LocalStorage;

/// The auth context as provided to the view tree.
pub type AppAuth = auth::AuthContext<LocalStorage, ApiClient>;
