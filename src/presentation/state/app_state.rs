use std::sync::Arc;

use crate::application::ports::{MediaTranscoder, RenderEngine};
use crate::application::services::{CaptionService, RenderService};
use crate::presentation::config::Settings;

pub struct AppState<M, R>
where
    M: MediaTranscoder,
    R: RenderEngine,
{
    pub caption_service: Arc<CaptionService<M>>,
    pub render_service: Arc<RenderService<R>>,
    pub transcoder: Arc<M>,
    pub settings: Settings,
}

impl<M, R> Clone for AppState<M, R>
where
    M: MediaTranscoder,
    R: RenderEngine,
{
    fn clone(&self) -> Self {
        Self {
            caption_service: Arc::clone(&self.caption_service),
            render_service: Arc::clone(&self.render_service),
            transcoder: Arc::clone(&self.transcoder),
            settings: self.settings.clone(),
        }
    }
}
