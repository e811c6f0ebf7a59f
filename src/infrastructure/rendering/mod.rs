mod bundle_cache;
mod mock_renderer;
mod remotion_renderer;

pub use bundle_cache::BundleCache;
pub use mock_renderer::MockRenderEngine;
pub use remotion_renderer::{RemotionRenderer, CAPTIONED_COMPOSITION};
