//! Image generation providers.

mod openai;

pub use openai::{OpenAiImageProvider, OpenAiImageProviderBuilder, DEFAULT_BASE_URL};
