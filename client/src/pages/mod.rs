//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (params, hooks, navigation) and
//! delegates rendering details to `components`.

pub mod account;
pub mod blog;
pub mod blog_post;
pub mod booking;
pub mod home;
pub mod login;
pub mod search;
pub mod trek;
