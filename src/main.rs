mod config;
mod routes;

use leptos::prelude::get_configuration;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env().expect("server configuration");
    let leptos_options = get_configuration(None).expect("leptos configuration").leptos_options;

    let app = routes::leptos_app(leptos_options);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "evertrek listening");
    axum::serve(listener, app).await.expect("server failed");
}
