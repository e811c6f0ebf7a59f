mod assemblyai_engine;
mod engine_factory;
mod mock_engine;
mod openai_engine;

pub use assemblyai_engine::AssemblyAiEngine;
pub use engine_factory::TranscriptionEngineFactory;
pub use mock_engine::MockTranscriptionEngine;
pub use openai_engine::OpenAiTranscriptionEngine;
