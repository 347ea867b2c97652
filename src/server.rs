//! Per-agent HTTP boundary.
//!
//! Each agent owns its router and listener, bound to its own address; there
//! is no process-global route table, so several agents in one process (or in
//! tests) never collide on registration.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::transport::BridgeHandle;

/// Liveness response, independent of loop state.
#[derive(Debug, Clone, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Build the router for one agent: `POST /{name}` drives the loop through
/// the bridge, `GET /health` reports liveness. Non-POST methods on the agent
/// route are rejected by the method router before anything reaches the loop.
pub fn router(name: &str, bridge: Arc<BridgeHandle>) -> Router {
    Router::new()
        .route(&format!("/{}", name), post(ask))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(bridge)
}

/// Forward one request body through the bridge and reply with the agent's
/// emitted text.
async fn ask(
    State(bridge): State<Arc<BridgeHandle>>,
    body: String,
) -> Result<String, StatusCode> {
    bridge
        .exchange(body)
        .await
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Bind and serve one agent's router on its own listener.
pub async fn serve(addr: String, router: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "agent listener started");
    axum::serve(listener, router).await?;
    Ok(())
}
