/// Health check endpoint
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "storage": "postgres",
///   "database": "connected"
/// }
/// ```

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,

    /// Application version
    pub version: String,

    /// Storage backend name
    pub storage: String,

    /// `connected` or `disconnected`
    pub database: String,
}

/// Reports liveness plus storage reachability
///
/// Always answers 200 so load balancers can tell a degraded server from a
/// dead one.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Storage health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: state.store.backend().to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
    })
}
