//! API routes.

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::generate::{generate_video, generate_video_async, webhook};
use crate::handlers::health::{health, ready};
use crate::handlers::status::{download_video, video_status};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let video_routes = Router::new()
        // Synchronous generation (streams the artifact)
        .route("/generate_video", post(generate_video))
        // Asynchronous generation (returns a job id)
        .route("/generate_video_async", post(generate_video_async))
        // Job polling and download
        .route("/video_status/:video_id", get(video_status))
        .route("/download_video/:video_id", get(download_video))
        // Webhook-triggered synchronous generation
        .route("/webhook", post(webhook));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/ready", get(ready));

    Router::new()
        .merge(video_routes)
        .merge(health_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_methods = [Method::GET, Method::POST, Method::OPTIONS];
    let allowed_headers = [header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN];
    let exposed_headers = [
        header::CONTENT_LENGTH,
        header::CONTENT_TYPE,
        header::CONTENT_DISPOSITION,
    ];

    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_methods(allowed_methods)
            .allow_headers(Any)
            .expose_headers(exposed_headers)
            .allow_origin(Any)
    } else {
        let origins: Vec<axum::http::HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_methods(allowed_methods)
            .allow_headers(allowed_headers)
            .expose_headers(exposed_headers)
            .allow_origin(origins)
    }
}
