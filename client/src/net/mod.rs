//! Networking modules for the backend REST API and the routing service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles the EverTrek backend, `routing` talks to GraphHopper,
//! `types` defines the shared wire schema and `error` the failure taxonomy.

pub mod api;
pub mod blog_content;
pub mod error;
pub mod routing;
pub mod types;
