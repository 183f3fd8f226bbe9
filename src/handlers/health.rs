use crate::error::{ApiError, ErrorResponse};
use crate::models::HealthSnapshot;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /healthy handler - Health check endpoint
///
/// Reports process uptime, memory usage, host load average and the port the
/// service was configured with. Metrics are read fresh on every request.
#[utoipa::path(
    get,
    path = routes::HEALTH,
    responses(
        (status = 200, description = "Service is healthy", body = HealthSnapshot),
        (status = 500, description = "Process metrics unavailable", body = ErrorResponse)
    ),
    tag = "health"
)]
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<HealthSnapshot>), ApiError> {
    let snapshot = state
        .health
        .report(state.config.port)
        .map_err(|e| ApiError::internal(e, state.config.debug))?;

    tracing::debug!(
        "Health check passed (uptime: {:.3}s, rss: {} bytes)",
        snapshot.uptime,
        snapshot.memory.rss
    );
    Ok((StatusCode::OK, Json(snapshot)))
}
