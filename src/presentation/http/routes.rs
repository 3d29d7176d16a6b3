//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, put},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{auth_middleware, track_metrics};
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        // Route-level so the matched path template is available for labels
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API v1 routes (all require a bearer token)
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(course_routes())
        .merge(section_routes())
        .merge(resource_routes())
        .merge(catalog_routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn course_routes() -> Router<AppState> {
    use handlers::course;

    Router::new()
        .route("/courses", get(course::list_courses).post(course::create_course))
        .route(
            "/courses/{course_id}",
            get(course::get_course)
                .patch(course::update_course)
                .delete(course::delete_course),
        )
}

fn section_routes() -> Router<AppState> {
    use handlers::section;

    Router::new()
        .route(
            "/courses/{course_id}/sections",
            get(section::list_sections).post(section::create_section),
        )
        .route(
            "/courses/{course_id}/sections/reorder",
            put(section::reorder_sections),
        )
        .route(
            "/courses/{course_id}/sections/{section_id}",
            get(section::get_section)
                .patch(section::update_section)
                .delete(section::delete_section),
        )
}

fn resource_routes() -> Router<AppState> {
    use handlers::resource;

    Router::new()
        .route(
            "/courses/{course_id}/sections/{section_id}/resources",
            get(resource::list_resources).post(resource::create_resource),
        )
        .route(
            "/courses/{course_id}/sections/{section_id}/resources/{resource_id}",
            axum::routing::delete(resource::delete_resource),
        )
}

fn catalog_routes() -> Router<AppState> {
    use handlers::catalog;

    Router::new()
        .route("/categories", get(catalog::list_categories))
        .route(
            "/categories/{category_id}/subcategories",
            get(catalog::list_subcategories),
        )
        .route("/levels", get(catalog::list_levels))
}
