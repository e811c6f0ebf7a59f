use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use captionify::application::ports::{
    MediaTranscoder, TranscoderError, TranscriptionError,
};
use captionify::application::services::{CaptionError, CaptionService};
use captionify::application::RetryPolicy;
use captionify::domain::CaptionSegment;
use captionify::infrastructure::media::MockTranscoder;
use captionify::infrastructure::transcription::MockTranscriptionEngine;

fn segments() -> Vec<CaptionSegment> {
    vec![
        CaptionSegment::new(0.0, 1.2, "hello").unwrap(),
        CaptionSegment::new(1.2, 2.8, "world").unwrap(),
    ]
}

fn transport_error() -> TranscriptionError {
    TranscriptionError::Transport("connection reset".to_string())
}

fn short_retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(20))
}

async fn write_source_video(dir: &Path) -> std::path::PathBuf {
    let video = dir.join("source.mp4");
    tokio::fs::write(&video, b"fake mp4 bytes").await.unwrap();
    video
}

fn wav_files_in(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| name.ends_with(".wav"))
        .collect()
}

#[tokio::test]
async fn given_healthy_engine_when_generating_then_returns_segments_and_removes_wav() {
    let dir = tempfile::TempDir::new().unwrap();
    let video = write_source_video(dir.path()).await;

    let transcoder = Arc::new(MockTranscoder::new());
    let engine = Arc::new(MockTranscriptionEngine::succeeding(segments()));
    let service = CaptionService::new(
        Arc::clone(&transcoder),
        engine.clone(),
        short_retry(),
        dir.path().to_path_buf(),
    );

    let captions = service.generate_captions(&video).await.unwrap();

    assert_eq!(captions, segments());
    assert_eq!(transcoder.extractions(), 1);
    assert_eq!(engine.calls(), 1);
    assert!(wav_files_in(dir.path()).is_empty());
}

#[tokio::test]
async fn given_two_transport_failures_when_generating_then_third_attempt_succeeds() {
    let dir = tempfile::TempDir::new().unwrap();
    let video = write_source_video(dir.path()).await;

    let engine = Arc::new(MockTranscriptionEngine::with_script(
        vec![Err(transport_error()), Err(transport_error())],
        segments(),
    ));
    let service = CaptionService::new(
        Arc::new(MockTranscoder::new()),
        engine.clone(),
        RetryPolicy::default(),
        dir.path().to_path_buf(),
    );

    let started = Instant::now();
    let captions = service.generate_captions(&video).await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(captions, segments());
    assert_eq!(engine.calls(), 3);
    // Two inter-attempt delays at the fixed two-second spacing.
    assert!(elapsed >= Duration::from_secs(4), "elapsed {:?}", elapsed);
}

#[tokio::test]
async fn given_persistent_transport_failure_when_generating_then_last_error_surfaces() {
    let dir = tempfile::TempDir::new().unwrap();
    let video = write_source_video(dir.path()).await;

    let engine = Arc::new(MockTranscriptionEngine::with_script(
        vec![
            Err(transport_error()),
            Err(transport_error()),
            Err(TranscriptionError::ApiStatus {
                status: 503,
                body: "still down".to_string(),
            }),
        ],
        Vec::new(),
    ));
    let service = CaptionService::new(
        Arc::new(MockTranscoder::new()),
        engine.clone(),
        short_retry(),
        dir.path().to_path_buf(),
    );

    let result = service.generate_captions(&video).await;

    assert_eq!(engine.calls(), 3);
    assert!(matches!(
        result,
        Err(CaptionError::Transcription(TranscriptionError::ApiStatus {
            status: 503,
            ..
        }))
    ));
    assert!(wav_files_in(dir.path()).is_empty());
}

#[tokio::test]
async fn given_provider_marked_job_failed_when_generating_then_no_retry_happens() {
    let dir = tempfile::TempDir::new().unwrap();
    let video = write_source_video(dir.path()).await;

    let engine = Arc::new(MockTranscriptionEngine::with_script(
        vec![Err(TranscriptionError::JobFailed("corrupt audio".to_string()))],
        segments(),
    ));
    let service = CaptionService::new(
        Arc::new(MockTranscoder::new()),
        engine.clone(),
        short_retry(),
        dir.path().to_path_buf(),
    );

    let result = service.generate_captions(&video).await;

    assert_eq!(engine.calls(), 1);
    assert!(matches!(
        result,
        Err(CaptionError::Transcription(TranscriptionError::JobFailed(_)))
    ));
}

#[tokio::test]
async fn given_empty_transcript_when_generating_then_returns_empty_sequence() {
    let dir = tempfile::TempDir::new().unwrap();
    let video = write_source_video(dir.path()).await;

    let service = CaptionService::new(
        Arc::new(MockTranscoder::new()),
        Arc::new(MockTranscriptionEngine::succeeding(Vec::new())),
        short_retry(),
        dir.path().to_path_buf(),
    );

    let captions = service.generate_captions(&video).await.unwrap();

    assert!(captions.is_empty());
}

#[tokio::test]
async fn given_missing_video_when_generating_then_not_found_without_extraction() {
    let dir = tempfile::TempDir::new().unwrap();

    let transcoder = Arc::new(MockTranscoder::new());
    let engine = Arc::new(MockTranscriptionEngine::succeeding(segments()));
    let service = CaptionService::new(
        Arc::clone(&transcoder),
        engine.clone(),
        short_retry(),
        dir.path().to_path_buf(),
    );

    let result = service
        .generate_captions(&dir.path().join("nope.mp4"))
        .await;

    assert!(matches!(result, Err(CaptionError::VideoNotFound(_))));
    assert_eq!(transcoder.extractions(), 0);
    assert_eq!(engine.calls(), 0);
}

struct FailingTranscoder;

#[async_trait]
impl MediaTranscoder for FailingTranscoder {
    async fn extract_audio(
        &self,
        _video_path: &Path,
        _audio_path: &Path,
    ) -> Result<(), TranscoderError> {
        Err(TranscoderError::CommandFailed(
            "no audio track found".to_string(),
        ))
    }

    async fn normalize_video(
        &self,
        _input_path: &Path,
        _output_path: &Path,
    ) -> Result<(), TranscoderError> {
        Ok(())
    }
}

#[tokio::test]
async fn given_extraction_failure_when_generating_then_error_carries_diagnostic() {
    let dir = tempfile::TempDir::new().unwrap();
    let video = write_source_video(dir.path()).await;

    let engine = Arc::new(MockTranscriptionEngine::succeeding(segments()));
    let service = CaptionService::new(
        Arc::new(FailingTranscoder),
        engine.clone(),
        short_retry(),
        dir.path().to_path_buf(),
    );

    let result = service.generate_captions(&video).await;

    match result {
        Err(CaptionError::Extraction(e)) => {
            assert!(e.to_string().contains("no audio track found"));
        }
        other => panic!("expected extraction error, got {:?}", other.map(|_| ())),
    }
    assert_eq!(engine.calls(), 0);
    assert!(wav_files_in(dir.path()).is_empty());
}
