use std::sync::Arc;

use crate::application::ports::TranscriptionEngine;
use crate::presentation::config::{TranscriptionProviderSetting, TranscriptionSettings};

use super::assemblyai_engine::AssemblyAiEngine;
use super::openai_engine::OpenAiTranscriptionEngine;

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    /// Settings are validated at startup, so construction itself cannot
    /// fail; a missing key never gets this far.
    pub fn create(settings: &TranscriptionSettings) -> Arc<dyn TranscriptionEngine> {
        match settings.provider {
            TranscriptionProviderSetting::OpenAi => Arc::new(OpenAiTranscriptionEngine::new(
                settings.api_key.clone(),
                settings.base_url.clone(),
                Some(settings.model.clone()),
            )),
            TranscriptionProviderSetting::AssemblyAi => Arc::new(AssemblyAiEngine::new(
                settings.api_key.clone(),
                settings.base_url.clone(),
            )),
        }
    }
}
