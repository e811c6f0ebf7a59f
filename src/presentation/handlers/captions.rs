use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::ports::{MediaTranscoder, RenderEngine};
use crate::application::services::CaptionError;
use crate::domain::CaptionSegment;
use crate::presentation::resolve::resolve_video_reference;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionsRequest {
    #[serde(default)]
    pub video_path: Option<String>,
}

#[derive(Serialize)]
pub struct CaptionsResponse {
    pub captions: Vec<CaptionSegment>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Runs the extract-audio → transcribe leg for a previously uploaded
/// video. Nothing is cached server-side; repeated calls recompute.
#[tracing::instrument(skip(state, request))]
pub async fn captions_handler<M, R>(
    State(state): State<AppState<M, R>>,
    Json(request): Json<CaptionsRequest>,
) -> Response
where
    M: MediaTranscoder + 'static,
    R: RenderEngine + 'static,
{
    let Some(reference) = request.video_path else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "videoPath is required".to_string(),
            }),
        )
            .into_response();
    };

    let local_path = resolve_video_reference(
        &reference,
        &state.settings.storage.upload_dir,
        &state.settings.storage.output_dir,
    );

    tracing::debug!(reference = %reference, path = %local_path.display(), "Generating captions");

    match state.caption_service.generate_captions(&local_path).await {
        Ok(captions) => {
            tracing::info!(captions = captions.len(), "Caption generation succeeded");
            (StatusCode::OK, Json(CaptionsResponse { captions })).into_response()
        }
        Err(e @ CaptionError::VideoNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Caption generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Caption generation failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}
