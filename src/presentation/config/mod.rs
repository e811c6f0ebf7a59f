mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ConfigError, RendererSettings, ServerSettings, Settings, StorageSettings, TranscoderSettings,
    TranscriptionProviderSetting, TranscriptionSettings,
};
