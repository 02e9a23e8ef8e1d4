//! Axum application builder
//!
//! Routes:
//! - `POST /api/newsletter` - assemble a newsletter
//! - `GET /health` - liveness probe

use axum::Router;
use axum::routing::{get, post};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes::{health, newsletter};
use crate::state::AppState;

/// Create the Axum application with all routes
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health::health))
        .route("/api/newsletter", post(newsletter::create_newsletter))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Listen address
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Get bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
