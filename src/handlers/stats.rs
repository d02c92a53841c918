// src/handlers/stats.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{error::AppError, models::oposicion::Oposicion, services::StatsService};

/// DTO for requesting theme stats for several users at once.
#[derive(Debug, Deserialize, Validate)]
pub struct BatchStatsRequest {
    /// User ids to aggregate. Admin dashboards page their cohorts, so a
    /// single batch stays small.
    #[validate(length(max = 200, message = "Batch limited to 200 users"))]
    pub user_ids: Vec<String>,
    pub oposicion: String,
}

/// Per-topic stats over the user's whole answer history.
pub async fn get_user_theme_stats(
    State(service): State<StatsService>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    Json(service.get_user_theme_stats(&user_id).await)
}

/// Per-topic stats restricted to one exam track.
pub async fn get_user_theme_stats_by_oposicion(
    State(service): State<StatsService>,
    Path((user_id, oposicion)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let oposicion: Oposicion = oposicion.parse().map_err(AppError::BadRequest)?;

    Ok(Json(
        service
            .get_user_theme_stats_by_oposicion(&user_id, oposicion)
            .await,
    ))
}

/// Theme stats for a list of users, keyed by user id.
pub async fn get_user_theme_stats_batch(
    State(service): State<StatsService>,
    Json(payload): Json<BatchStatsRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let oposicion: Oposicion = payload.oposicion.parse().map_err(AppError::BadRequest)?;

    let results = service
        .get_user_theme_stats_batch(&payload.user_ids, oposicion)
        .await;

    Ok(Json(results))
}

/// Drops one user's cached theme stats so the next read recomputes.
pub async fn invalidate_theme_stats_cache(
    State(service): State<StatsService>,
    Path(user_id): Path<String>,
) -> StatusCode {
    service.invalidate_theme_stats_cache(&user_id);
    StatusCode::NO_CONTENT
}

/// Administrative reset of the whole theme-stats cache.
pub async fn clear_all_theme_stats_cache(State(service): State<StatsService>) -> StatusCode {
    service.clear_all_theme_stats_cache();
    StatusCode::NO_CONTENT
}
