//! Image provider trait.

use crate::error::Result;
use crate::image::types::{GeneratedImage, GenerationRequest};
use async_trait::async_trait;

/// Trait for image generation providers.
///
/// The batch loop only talks to this trait, so tests can substitute a
/// provider that never touches the network.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generates one image from the given request.
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage>;

    /// Returns the name of this provider for display.
    fn name(&self) -> &str;
}
