//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host serves only the front-end: Leptos SSR for every client route,
//! the compiled WASM/CSS bundle under `/pkg`, and a health check. The
//! EverTrek REST API lives on a separate backend the browser calls directly.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Routes that exist regardless of the Leptos app.
pub fn base_routes() -> Router {
    Router::new().route("/healthz", get(healthz))
}

/// Full application router: health check, static bundle, SSR pages.
pub fn leptos_app(leptos_options: LeptosOptions) -> Router {
    let routes = generate_route_list(evertrek_client::app::App);
    tracing::debug!(count = routes.len(), "leptos routes generated");

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || evertrek_client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    base_routes()
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
