use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{MediaTranscoder, RenderEngine};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    captions_handler, health_handler, render_handler, upload_handler,
};
use crate::presentation::state::AppState;

const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

pub fn create_router<M, R>(state: AppState<M, R>) -> Router
where
    M: MediaTranscoder + 'static,
    R: RenderEngine + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let upload_dir = state.settings.storage.upload_dir.clone();
    let output_dir = state.settings.storage.output_dir.clone();

    Router::new()
        .route("/", get(health_handler))
        .route("/health", get(health_handler))
        .route("/upload", post(upload_handler::<M, R>))
        .route("/captions", post(captions_handler::<M, R>))
        .route("/render", post(render_handler::<M, R>))
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .nest_service("/outputs", ServeDir::new(output_dir))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
