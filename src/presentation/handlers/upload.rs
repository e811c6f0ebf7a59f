use std::io;
use std::path::Path;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::application::ports::{MediaTranscoder, RenderEngine};
use crate::presentation::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub video_path: String,
    pub filename: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Accepts a multipart `video` field, streams it to disk, re-encodes it
/// to the canonical MP4, and discards the raw original on success.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler<M, R>(
    State(state): State<AppState<M, R>>,
    mut multipart: Multipart,
) -> Response
where
    M: MediaTranscoder + 'static,
    R: RenderEngine + 'static,
{
    let mut field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            tracing::warn!("Upload request with no file");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Video file required".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read multipart: {}", e),
                }),
            )
                .into_response();
        }
    };

    if field.name() != Some("video") {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Video file required in field 'video'".to_string(),
            }),
        )
            .into_response();
    }

    let original_name = field.file_name().unwrap_or("upload.mp4").to_string();
    let safe_name = sanitize_filename(&original_name);
    let millis = chrono::Utc::now().timestamp_millis();

    let upload_dir = state.settings.storage.upload_dir.clone();
    if let Err(e) = tokio::fs::create_dir_all(&upload_dir).await {
        tracing::error!(error = %e, "Failed to create upload directory");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to store upload: {}", e),
            }),
        )
            .into_response();
    }

    let raw_path = upload_dir.join(format!("raw-{}-{}", millis, safe_name));
    let stem = Path::new(&safe_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("video");
    let final_name = format!("safe-{}-{}.mp4", millis, stem);
    let final_path = upload_dir.join(&final_name);

    let mut file = match tokio::fs::File::create(&raw_path).await {
        Ok(f) => f,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create upload file");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to store upload: {}", e),
                }),
            )
                .into_response();
        }
    };

    loop {
        match field.chunk().await {
            Ok(Some(chunk)) => {
                if let Err(e) = file.write_all(&chunk).await {
                    tracing::error!(error = %e, "Failed to write upload chunk");
                    remove_quietly(&raw_path).await;
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ErrorResponse {
                            error: format!("Failed to store upload: {}", e),
                        }),
                    )
                        .into_response();
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read upload stream");
                remove_quietly(&raw_path).await;
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read upload: {}", e),
                    }),
                )
                    .into_response();
            }
        }
    }

    if let Err(e) = file.flush().await {
        tracing::error!(error = %e, "Failed to flush upload file");
        remove_quietly(&raw_path).await;
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to store upload: {}", e),
            }),
        )
            .into_response();
    }
    drop(file);

    if let Err(e) = state.transcoder.normalize_video(&raw_path, &final_path).await {
        tracing::error!(error = %e, "Upload normalization failed");
        remove_quietly(&raw_path).await;
        remove_quietly(&final_path).await;
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Upload normalization failed: {}", e),
            }),
        )
            .into_response();
    }

    // The raw original is gone once the canonical MP4 exists.
    remove_quietly(&raw_path).await;

    let video_url = format!(
        "{}/uploads/{}",
        state.settings.server.public_base_url, final_name
    );

    tracing::info!(
        original = %original_name,
        stored = %final_name,
        "Upload normalized and stored"
    );

    (
        StatusCode::OK,
        Json(UploadResponse {
            video_path: video_url,
            filename: final_name,
        }),
    )
        .into_response()
}

/// Mirror of the upload sanitizer the frontend already relies on: every
/// character outside `[A-Za-z0-9_.-]` becomes an underscore.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

async fn remove_quietly(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove file");
        }
    }
}
