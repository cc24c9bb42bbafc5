//! Health check endpoint.

use actix_web::{HttpResponse, web};

use scribe_shared::HealthResponse;

use crate::state::AppState;

/// Health check endpoint - reports server and store status.
///
/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let store = match state.store.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "Store ping failed");
            "unavailable"
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: store.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
