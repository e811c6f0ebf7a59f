use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use captionify::application::services::{CaptionService, RenderService};
use captionify::application::RetryPolicy;
use captionify::infrastructure::media::FfmpegTranscoder;
use captionify::infrastructure::observability::{init_tracing, TracingConfig};
use captionify::infrastructure::rendering::RemotionRenderer;
use captionify::infrastructure::transcription::TranscriptionEngineFactory;
use captionify::presentation::{create_router, AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    init_tracing(TracingConfig::default());

    tokio::fs::create_dir_all(&settings.storage.upload_dir)
        .await
        .context("creating upload directory")?;
    tokio::fs::create_dir_all(&settings.storage.output_dir)
        .await
        .context("creating output directory")?;

    let transcoder = Arc::new(FfmpegTranscoder::new(&settings.transcoder.ffmpeg_path));
    transcoder
        .verify()
        .await
        .context("transcoder binary is not usable")?;

    let engine = TranscriptionEngineFactory::create(&settings.transcription);

    let renderer = Arc::new(RemotionRenderer::new(
        &settings.renderer.binary,
        &settings.renderer.project_entry,
        &settings.renderer.bundle_dir,
    ));

    let caption_service = Arc::new(CaptionService::new(
        Arc::clone(&transcoder),
        engine,
        RetryPolicy::default(),
        settings.storage.upload_dir.clone(),
    ));

    let render_service = Arc::new(RenderService::new(
        renderer,
        settings.storage.output_dir.clone(),
        settings.server.public_base_url.clone(),
    ));

    let state = AppState {
        caption_service,
        render_service,
        transcoder,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.server.port));
    tracing::info!(
        %addr,
        base_url = %settings.server.public_base_url,
        environment = %settings.storage.environment,
        uploads = %settings.storage.upload_dir.display(),
        outputs = %settings.storage.output_dir.display(),
        "Captionify backend listening"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
