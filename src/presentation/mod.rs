pub mod config;
pub mod handlers;
mod resolve;
pub mod router;
pub mod state;

pub use config::{ConfigError, Environment, Settings, TranscriptionProviderSetting};
pub use resolve::resolve_video_reference;
pub use router::create_router;
pub use state::AppState;
