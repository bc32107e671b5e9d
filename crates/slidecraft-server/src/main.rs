//! Slidecraft HTTP backend.
//!
//! Thin endpoints that template a prompt, forward it to a hosted
//! text-generation provider, and return parsed (or fallback-patched) JSON
//! for the editor frontend.

mod prompts;
mod provider;
mod routes;

use provider::UnconfiguredGenerator;
use routes::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slidecraft_server=info,tower_http=info".into()),
        )
        .init();

    let state = Arc::new(AppState {
        generator: Arc::new(UnconfiguredGenerator),
    });
    let app = routes::app(state);

    let addr = std::env::var("SLIDECRAFT_ADDR")
        .ok()
        .and_then(|raw| raw.parse::<SocketAddr>().ok())
        .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3040)));
    info!("slidecraft server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
