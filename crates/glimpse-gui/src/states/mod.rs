mod choices;
mod config;
mod ui;
mod viewport;

pub use choices::ResizeFilter;
pub use config::{AppConfig, ProcessingSettings, ResizeSettings};
pub use ui::UIState;
pub use viewport::ViewportTextures;
