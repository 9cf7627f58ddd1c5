use axum::Json;

use crate::web::{types::HealthStatus, SERVICE_NAME};

/// Liveness probe, never touches the record store.
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        service: SERVICE_NAME,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
