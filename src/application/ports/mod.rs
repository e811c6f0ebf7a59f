mod render_engine;
mod transcoder;
mod transcription_engine;

pub use render_engine::{RenderEngine, RenderError, RenderJob};
pub use transcoder::{MediaTranscoder, TranscoderError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
