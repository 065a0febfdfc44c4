//! HTTP router: the WebSocket endpoint plus a health probe.

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use skylink_sim::{DroneSimulation, SimConfig};

use crate::config::ServerConfig;
use crate::stream;

/// Build the application router.
///
/// The dashboard is served from a different origin, so CORS stays
/// permissive.
pub fn create_router(config: ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ws/simulation", get(ws_handler))
        .layer(CorsLayer::permissive())
        .with_state(config)
}

async fn health_check() -> &'static str {
    "OK"
}

/// Upgrade the connection and hand it to the stream loop.
async fn ws_handler(ws: WebSocketUpgrade, State(config): State<ServerConfig>) -> Response {
    ws.on_upgrade(move |socket| async move {
        let sim = DroneSimulation::new(SimConfig { seed: config.seed });
        stream::run(socket, sim).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_builds() {
        let _router = create_router(ServerConfig::default());
    }
}
