// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{delete, get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{stats, topics};
use crate::state::AppState;

/// Assembles the main application router.
///
/// * Mounts the theme-stats and topic-data sub-routers.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (service + config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let stats_routes = Router::new()
        .route("/themes/batch", post(stats::get_user_theme_stats_batch))
        .route("/themes", delete(stats::clear_all_theme_stats_cache))
        .route(
            "/themes/{user_id}",
            get(stats::get_user_theme_stats).delete(stats::invalidate_theme_stats_cache),
        )
        .route(
            "/themes/{user_id}/{oposicion}",
            get(stats::get_user_theme_stats_by_oposicion),
        );

    let topic_routes = Router::new()
        .route("/", delete(topics::clear_all_topic_cache))
        .route(
            "/{oposicion}/{topic_number}",
            get(topics::get_topic_full_data).delete(topics::invalidate_topic_cache),
        );

    Router::new()
        .nest("/api/stats", stats_routes)
        .nest("/api/topics", topic_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
