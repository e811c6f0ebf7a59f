use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::CaptionSegment;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const MAX_POLLS: u32 = 150;

/// Speech-to-text over the AssemblyAI-style job API: upload the audio,
/// create a transcript job, poll until it settles, then fetch sentence
/// spans. The provider reports timestamps in milliseconds; they are
/// converted to seconds here.
pub struct AssemblyAiEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    poll_interval: Duration,
}

impl AssemblyAiEngine {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.assemblyai.com".to_string()),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn upload_audio(&self, audio_data: &[u8]) -> Result<String, TranscriptionError> {
        let response = self
            .client
            .post(self.endpoint("/v2/upload"))
            .header("authorization", &self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .body(audio_data.to_vec())
            .send()
            .await
            .map_err(|e| TranscriptionError::Transport(format!("upload: {}", e)))?;

        let upload: UploadResponse = read_json(response).await?;
        Ok(upload.upload_url)
    }

    async fn create_job(&self, audio_url: &str) -> Result<String, TranscriptionError> {
        let body = serde_json::json!({
            "audio_url": audio_url,
            "punctuate": true,
            "format_text": true,
        });

        let response = self
            .client
            .post(self.endpoint("/v2/transcript"))
            .header("authorization", &self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| TranscriptionError::Transport(format!("create transcript: {}", e)))?;

        let job: TranscriptResponse = read_json(response).await?;
        Ok(job.id)
    }

    async fn wait_for_completion(&self, job_id: &str) -> Result<(), TranscriptionError> {
        let url = self.endpoint(&format!("/v2/transcript/{}", job_id));

        for _ in 0..MAX_POLLS {
            let response = self
                .client
                .get(&url)
                .header("authorization", &self.api_key)
                .timeout(REQUEST_TIMEOUT)
                .send()
                .await
                .map_err(|e| TranscriptionError::Transport(format!("poll: {}", e)))?;

            let job: TranscriptResponse = read_json(response).await?;
            match job.status.as_str() {
                "completed" => return Ok(()),
                // The provider itself marked the job failed; retrying the
                // whole submission would burn quota for the same outcome.
                "error" => {
                    return Err(TranscriptionError::JobFailed(
                        job.error.unwrap_or_else(|| "no diagnostic provided".to_string()),
                    ));
                }
                _ => tokio::time::sleep(self.poll_interval).await,
            }
        }

        Err(TranscriptionError::Transport(format!(
            "transcript {} still pending after {} polls",
            job_id, MAX_POLLS
        )))
    }

    async fn fetch_sentences(
        &self,
        job_id: &str,
    ) -> Result<Vec<CaptionSegment>, TranscriptionError> {
        let response = self
            .client
            .get(self.endpoint(&format!("/v2/transcript/{}/sentences", job_id)))
            .header("authorization", &self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| TranscriptionError::Transport(format!("sentences: {}", e)))?;

        let sentences: SentencesResponse = read_json(response).await?;

        let mut segments = Vec::with_capacity(sentences.sentences.len());
        for s in sentences.sentences {
            match CaptionSegment::from_millis(s.start, s.end, s.text.trim()) {
                Ok(segment) => segments.push(segment),
                Err(e) => {
                    tracing::warn!(error = %e, "Dropping sentence with invalid timing");
                }
            }
        }
        Ok(segments)
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    upload_url: String,
}

#[derive(Deserialize)]
struct TranscriptResponse {
    id: String,
    status: String,
    error: Option<String>,
}

#[derive(Deserialize)]
struct SentencesResponse {
    sentences: Vec<Sentence>,
}

#[derive(Deserialize)]
struct Sentence {
    text: String,
    start: u64,
    end: u64,
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, TranscriptionError> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        return Err(TranscriptionError::ApiStatus { status, body });
    }
    response
        .json()
        .await
        .map_err(|e| TranscriptionError::InvalidResponse(format!("parse response: {}", e)))
}

#[async_trait]
impl TranscriptionEngine for AssemblyAiEngine {
    async fn transcribe(
        &self,
        audio_data: &[u8],
    ) -> Result<Vec<CaptionSegment>, TranscriptionError> {
        let audio_url = self.upload_audio(audio_data).await?;
        let job_id = self.create_job(&audio_url).await?;
        tracing::debug!(job_id = %job_id, "Transcript job created, polling");

        self.wait_for_completion(&job_id).await?;
        let segments = self.fetch_sentences(&job_id).await?;

        tracing::info!(job_id = %job_id, segments = segments.len(), "Transcript job completed");
        Ok(segments)
    }
}
