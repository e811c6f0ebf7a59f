mod caption_service;
mod render_service;

pub use caption_service::{CaptionError, CaptionService};
pub use render_service::RenderService;
