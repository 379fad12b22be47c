//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render page chrome and presentational pieces. Auth-aware ones
//! read `AuthState` and the auth context from Leptos context providers.

pub mod blog_body;
pub mod blog_card;
pub mod booking_confirmation;
pub mod fetch_status;
pub mod modal;
pub mod nav_dropdown;
pub mod protected_route;
pub mod route_map;
pub mod scroll_to_top;
pub mod search_card;
pub mod spinner;
pub mod top_bar;
