//! Router assembly: quiz endpoints, static page, CORS, and HTTP tracing.

use std::{path::Path, sync::Arc};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - `GET /` serving `<static_dir>/index.html`, other static files as fallback
///   (behind the same CORS and trace layers as the API)
/// - `POST /upload` (multipart `pdf`) and `POST /evaluate` (JSON)
/// - `GET /health`
/// - upload body limit from settings
/// - CORS (allow any origin/method/headers) and per-request trace spans
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_dir = Path::new(&state.settings.server.static_dir);
    let index = ServeFile::new(static_dir.join("index.html"));
    let static_service = ServeDir::new(static_dir);
    let body_limit = state.settings.server.max_upload_bytes;

    Router::new()
        .route_service("/", index)
        .route("/health", get(http::http_health))
        .route("/upload", post(http::http_upload))
        .route("/evaluate", post(http::http_evaluate))
        .fallback_service(static_service)
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}
