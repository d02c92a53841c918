// src/handlers/topics.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{error::AppError, models::oposicion::Oposicion, services::StatsService};

#[derive(Debug, Deserialize)]
pub struct TopicDataParams {
    /// When present, the response carries this user's progress block.
    /// Anonymous requests get catalog data only (and are cacheable).
    pub user_id: Option<String>,
}

/// Full statistics for one topic of a track.
pub async fn get_topic_full_data(
    State(service): State<StatsService>,
    Path((oposicion, topic_number)): Path<(String, i32)>,
    Query(params): Query<TopicDataParams>,
) -> Result<impl IntoResponse, AppError> {
    let oposicion: Oposicion = oposicion.parse().map_err(AppError::BadRequest)?;

    let result = service
        .get_topic_full_data(topic_number, oposicion, params.user_id.as_deref())
        .await;

    Ok(Json(result))
}

/// Drops the cached anonymous entry for one topic, e.g. after the
/// content team touches its question pool.
pub async fn invalidate_topic_cache(
    State(service): State<StatsService>,
    Path((oposicion, topic_number)): Path<(String, i32)>,
) -> Result<StatusCode, AppError> {
    let oposicion: Oposicion = oposicion.parse().map_err(AppError::BadRequest)?;
    service.invalidate_topic_cache(topic_number, oposicion);
    Ok(StatusCode::NO_CONTENT)
}

/// Administrative reset of the whole topic-data cache.
pub async fn clear_all_topic_cache(State(service): State<StatsService>) -> StatusCode {
    service.clear_all_topic_cache();
    StatusCode::NO_CONTENT
}
