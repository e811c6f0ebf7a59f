mod captions;
mod health;
mod render;
mod upload;

pub use captions::captions_handler;
pub use health::health_handler;
pub use render::render_handler;
pub use upload::upload_handler;
