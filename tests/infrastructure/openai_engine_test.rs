use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use captionify::application::ports::{TranscriptionEngine, TranscriptionError};
use captionify::infrastructure::transcription::OpenAiTranscriptionEngine;

async fn start_mock_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/audio/transcriptions",
        post(move || async move {
            let status = axum::http::StatusCode::from_u16(response_status).unwrap();
            (status, response_body).into_response()
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

fn engine(base_url: &str) -> OpenAiTranscriptionEngine {
    OpenAiTranscriptionEngine::new(
        "test-key".to_string(),
        Some(base_url.to_string()),
        Some("gpt-4o-transcribe".to_string()),
    )
}

#[tokio::test]
async fn given_verbose_response_when_transcribing_then_segments_are_normalized() {
    let body = r#"{
        "text": "Hello world.",
        "segments": [
            {"start": 0.0, "end": 1.4, "text": " Hello"},
            {"start": 1.4, "end": 2.9, "text": " world."}
        ]
    }"#;
    let (base_url, shutdown_tx) = start_mock_server(200, body).await;

    let segments = engine(&base_url).transcribe(b"wav bytes").await.unwrap();

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].text, "Hello");
    assert_eq!(segments[0].start, 0.0);
    assert_eq!(segments[0].end, 1.4);
    assert!(segments.windows(2).all(|w| w[0].start <= w[1].start));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_response_without_segments_when_transcribing_then_returns_empty_sequence() {
    let body = r#"{"text": ""}"#;
    let (base_url, shutdown_tx) = start_mock_server(200, body).await;

    let segments = engine(&base_url).transcribe(b"silence").await.unwrap();

    assert!(segments.is_empty());
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_error_status_when_transcribing_then_returns_retryable_api_error() {
    let body = r#"{"error": {"message": "server overloaded"}}"#;
    let (base_url, shutdown_tx) = start_mock_server(503, body).await;

    let result = engine(&base_url).transcribe(b"wav bytes").await;

    match result {
        Err(e @ TranscriptionError::ApiStatus { status: 503, .. }) => {
            assert!(e.is_retryable());
        }
        other => panic!("expected api status error, got {:?}", other),
    }
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_segment_with_invalid_timing_when_transcribing_then_it_is_dropped() {
    let body = r#"{
        "text": "partial",
        "segments": [
            {"start": 0.0, "end": 0.0, "text": "zero width"},
            {"start": 0.5, "end": 2.0, "text": "kept"}
        ]
    }"#;
    let (base_url, shutdown_tx) = start_mock_server(200, body).await;

    let segments = engine(&base_url).transcribe(b"wav bytes").await.unwrap();

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].text, "kept");
    shutdown_tx.send(()).ok();
}
