//! Image generation module.

mod provider;
pub mod providers;
mod types;

pub use provider::ImageProvider;
pub use types::{
    GeneratedImage, GenerationRequest, ImageFormat, ImageSource, DEFAULT_MODEL, DEFAULT_QUALITY,
    DEFAULT_SIZE, DEFAULT_STYLE,
};
