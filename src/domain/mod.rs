mod caption;
mod style;
mod video;

pub use caption::{CaptionSegment, CaptionTimingError};
pub use style::CaptionStyle;
pub use video::{RenderedAsset, VideoAsset};
