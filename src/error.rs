// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::models::oposicion::Oposicion;

/// Internal error of the statistics service.
///
/// Public service methods never leak this type: every value is converted
/// into a `success:false` result envelope at the API boundary. `NotFound`
/// is an expected outcome (a topic number out of range for the track),
/// `DataFetch` preserves the underlying store message for diagnostics.
#[derive(Debug)]
pub enum StatsError {
    TopicNotFound {
        topic_number: i32,
        oposicion: Oposicion,
    },
    DataFetch(String),
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::TopicNotFound {
                topic_number,
                oposicion,
            } => write!(
                f,
                "Topic {} not found for oposicion {}",
                topic_number, oposicion
            ),
            StatsError::DataFetch(msg) => write!(f, "Data fetch failed: {}", msg),
        }
    }
}

impl std::error::Error for StatsError {}

/// Converts `sqlx::Error` into `StatsError::DataFetch`.
/// Allows using the `?` operator inside the store layer.
impl From<sqlx::Error> for StatsError {
    fn from(err: sqlx::Error) -> Self {
        StatsError::DataFetch(err.to_string())
    }
}

/// Global Application Error Enum for the HTTP layer.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request (malformed input, unknown oposicion key)
    BadRequest(String),

    // 404 Not Found
    NotFound(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
