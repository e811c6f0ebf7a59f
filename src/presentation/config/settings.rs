use std::path::PathBuf;

use super::environment::Environment;

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub transcription: TranscriptionSettings,
    pub transcoder: TranscoderSettings,
    pub renderer: RendererSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
    /// Externally reachable base URL, without a trailing slash. Baked
    /// into upload/output URLs and handed to the render engine.
    pub public_base_url: String,
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub environment: Environment,
    pub upload_dir: PathBuf,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptionProviderSetting {
    OpenAi,
    AssemblyAi,
}

impl TryFrom<String> for TranscriptionProviderSetting {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "assemblyai" => Ok(Self::AssemblyAi),
            other => Err(format!(
                "Invalid transcription provider: {}. Expected: openai or assemblyai",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProviderSetting,
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TranscoderSettings {
    pub ffmpeg_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RendererSettings {
    pub binary: PathBuf,
    pub project_entry: PathBuf,
    pub bundle_dir: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

impl Settings {
    /// Read configuration from the environment. A missing transcription
    /// credential is a fatal startup error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port: u16 = match std::env::var("PORT") {
            Err(_) => 5000,
            Ok(v) => v.parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                message: format!("not a port number: {}", v),
            })?,
        };

        let environment = match std::env::var("APP_ENV") {
            Ok(v) => Environment::try_from(v).map_err(|message| ConfigError::Invalid {
                var: "APP_ENV",
                message,
            })?,
            Err(_) => Environment::detect(),
        };

        let public_base_url = std::env::var("RENDER_EXTERNAL_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", port))
            .trim_end_matches('/')
            .to_string();

        let (default_upload, default_output, default_bundle) = match environment {
            Environment::Local => ("uploads", "outputs", "remotion-bundle"),
            Environment::Cloud => ("/tmp/uploads", "/tmp/outputs", "/tmp/remotion-bundle"),
        };

        let provider = match std::env::var("TRANSCRIPTION_PROVIDER") {
            Err(_) => TranscriptionProviderSetting::OpenAi,
            Ok(v) => {
                TranscriptionProviderSetting::try_from(v).map_err(|message| {
                    ConfigError::Invalid {
                        var: "TRANSCRIPTION_PROVIDER",
                        message,
                    }
                })?
            }
        };

        let api_key = match provider {
            TranscriptionProviderSetting::OpenAi => require("OPENAI_API_KEY")?,
            TranscriptionProviderSetting::AssemblyAi => require("ASSEMBLYAI_API_KEY")?,
        };

        Ok(Self {
            server: ServerSettings {
                port,
                public_base_url,
            },
            storage: StorageSettings {
                environment,
                upload_dir: env_path("UPLOAD_DIR", default_upload),
                output_dir: env_path("OUTPUT_DIR", default_output),
            },
            transcription: TranscriptionSettings {
                provider,
                api_key,
                model: std::env::var("TRANSCRIPTION_MODEL")
                    .unwrap_or_else(|_| "gpt-4o-transcribe".to_string()),
                base_url: std::env::var("TRANSCRIPTION_BASE_URL").ok(),
            },
            transcoder: TranscoderSettings {
                ffmpeg_path: env_path("FFMPEG_PATH", "ffmpeg"),
            },
            renderer: RendererSettings {
                binary: env_path("RENDERER_BIN", "remotion"),
                project_entry: env_path("RENDERER_ENTRY", "../remotion/src/index.ts"),
                bundle_dir: env_path("BUNDLE_DIR", default_bundle),
            },
        })
    }
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(var)),
    }
}

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}
