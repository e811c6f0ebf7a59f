use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::CaptionSegment;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Speech-to-text over the OpenAI-style `/audio/transcriptions` endpoint.
/// Requests the verbose segment format; timestamps arrive in seconds.
pub struct OpenAiTranscriptionEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiTranscriptionEngine {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: model.unwrap_or_else(|| "gpt-4o-transcribe".to_string()),
        }
    }
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    segments: Option<Vec<ResponseSegment>>,
}

#[derive(Deserialize)]
struct ResponseSegment {
    start: f64,
    end: f64,
    text: String,
}

#[async_trait]
impl TranscriptionEngine for OpenAiTranscriptionEngine {
    async fn transcribe(
        &self,
        audio_data: &[u8],
    ) -> Result<Vec<CaptionSegment>, TranscriptionError> {
        let url = format!("{}/audio/transcriptions", self.base_url.trim_end_matches('/'));

        let file_part = multipart::Part::bytes(audio_data.to_vec())
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| TranscriptionError::Transport(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .part("file", file_part);

        tracing::debug!(model = %self.model, "Submitting audio for transcription");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::Transport(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiStatus { status, body });
        }

        let result: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("parse response: {}", e)))?;

        let raw = result.segments.unwrap_or_default();
        let mut segments = Vec::with_capacity(raw.len());
        for s in raw {
            match CaptionSegment::new(s.start, s.end, s.text.trim()) {
                Ok(segment) => segments.push(segment),
                Err(e) => {
                    tracing::warn!(error = %e, "Dropping segment with invalid timing");
                }
            }
        }

        tracing::info!(segments = segments.len(), "Transcription response normalized");

        Ok(segments)
    }
}
