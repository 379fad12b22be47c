//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns and pure view logic
//! from page and component code so both can be tested without a DOM.

pub mod auth;
pub mod browser;
pub mod google;
pub mod search;
pub mod storage;
pub mod trek_route;
