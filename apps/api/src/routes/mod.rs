pub mod health;

use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::analysis::handlers;
use crate::errors::AppError;
use crate::render::handlers::handle_generate_pdf;
use crate::state::AppState;
use crate::uploads::MULTIPART_BODY_LIMIT;

/// Ceiling for JSON bodies.
const JSON_BODY_LIMIT: usize = 10 * 1024 * 1024;

async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    AppError::Internal(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/health",
            get(health::health_handler).fallback(route_not_found),
        )
        // Multipart workflows; per-file size is enforced while streaming.
        .route(
            "/api/process-resume",
            post(handlers::handle_process_resume)
                .layer(DefaultBodyLimit::max(MULTIPART_BODY_LIMIT))
                .fallback(route_not_found),
        )
        .route(
            "/api/bulk-analyze",
            post(handlers::handle_bulk_analyze)
                .layer(DefaultBodyLimit::max(MULTIPART_BODY_LIMIT))
                .fallback(route_not_found),
        )
        .route(
            "/api/generate-pdf",
            post(handle_generate_pdf).fallback(route_not_found),
        )
        .route(
            "/api/keyword-suggestions",
            post(handlers::handle_keyword_suggestions).fallback(route_not_found),
        )
        // Unknown paths and unsupported methods on known paths alike.
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT))
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}
