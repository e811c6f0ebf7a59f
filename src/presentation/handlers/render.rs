use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::ports::{MediaTranscoder, RenderEngine};
use crate::domain::{CaptionSegment, CaptionStyle, VideoAsset};
use crate::presentation::resolve::resolve_video_reference;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequestBody {
    #[serde(default)]
    pub video_path: Option<String>,
    #[serde(default)]
    pub captions: Option<Vec<CaptionSegment>>,
    #[serde(default)]
    pub style: Option<CaptionStyle>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResponse {
    pub output_url: String,
    pub filename: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Hands the source video URL, caption sequence, and style to the render
/// engine and reports the output URL under `/outputs`.
#[tracing::instrument(skip(state, request))]
pub async fn render_handler<M, R>(
    State(state): State<AppState<M, R>>,
    Json(request): Json<RenderRequestBody>,
) -> Response
where
    M: MediaTranscoder + 'static,
    R: RenderEngine + 'static,
{
    let (Some(reference), Some(captions)) = (request.video_path, request.captions) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "videoPath and captions array are required".to_string(),
            }),
        )
            .into_response();
    };

    for segment in &captions {
        if let Err(e) = segment.validate() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("invalid caption segment: {}", e),
                }),
            )
                .into_response();
        }
    }

    let style = request.style.unwrap_or_default();

    let local_path = resolve_video_reference(
        &reference,
        &state.settings.storage.upload_dir,
        &state.settings.storage.output_dir,
    );

    if !tokio::fs::try_exists(&local_path).await.unwrap_or(false) {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("video file not found: {}", local_path.display()),
            }),
        )
            .into_response();
    }

    let filename = local_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(&reference)
        .to_string();

    // The engine runs out of process and fetches the source over HTTP.
    let route = if local_path.starts_with(&state.settings.storage.output_dir) {
        "outputs"
    } else {
        "uploads"
    };
    let video_url = format!(
        "{}/{}/{}",
        state.settings.server.public_base_url, route, filename
    );
    let video = VideoAsset::new(local_path, video_url);

    tracing::debug!(
        video = %video.url(),
        captions = captions.len(),
        style = %style,
        "Starting render"
    );

    match state.render_service.render(&video, captions, style).await {
        Ok(asset) => (
            StatusCode::OK,
            Json(RenderResponse {
                output_url: asset.url().to_string(),
                filename: asset.filename().to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Video rendering failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Video rendering failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}
