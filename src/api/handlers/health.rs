//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::domain::repositories::MappingRepository;
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: Round-trip query
/// 2. **Cache**: Backend PING (always ok for the in-process cache)
/// 3. **Reseller**: Whether one is configured
/// 4. **Event Queue**: Checks if channel is open and reports capacity
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected" },
///     "cache": { "status": "ok", "message": "redis connected" },
///     "reseller": { "status": "ok", "message": "sandbox" },
///     "event_queue": { "status": "ok", "message": "Capacity: 1000" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = check_database(&state).await;
    let cache = check_cache(&state).await;
    let reseller = check_reseller(&state);
    let event_queue = check_event_queue(&state);

    let all_healthy =
        database.is_ok() && cache.is_ok() && reseller.is_ok() && event_queue.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database,
            cache,
            reseller,
            event_queue,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.purchase_service.repository().ping().await {
        Ok(()) => CheckStatus::ok("Connected"),
        Err(e) => CheckStatus::error(format!("Database error: {}", e)),
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    let backend = state.cache.backend();

    if state.cache.health_check().await {
        CheckStatus::ok(format!("{} connected", backend))
    } else {
        CheckStatus::error(format!("{} connection failed", backend))
    }
}

/// Without a reseller every purchase action fails, so the service is degraded.
fn check_reseller(state: &AppState) -> CheckStatus {
    match state.purchase_service.reseller_name() {
        Some(name) => CheckStatus::ok(name),
        None => CheckStatus::error("No reseller configured"),
    }
}

fn check_event_queue(state: &AppState) -> CheckStatus {
    if state.event_sink.is_closed() {
        CheckStatus::error("Event queue is closed")
    } else {
        CheckStatus::ok(format!("Capacity: {}", state.event_sink.capacity()))
    }
}
