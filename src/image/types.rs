//! Core types for image generation.

use crate::error::Result;
use std::path::Path;

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "dall-e-3";
/// Default pixel dimensions.
pub const DEFAULT_SIZE: &str = "1024x1024";
/// Default quality tier.
pub const DEFAULT_QUALITY: &str = "hd";
/// Default style tag.
pub const DEFAULT_STYLE: &str = "vivid";

/// Image formats recognised in API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// PNG format (lossless).
    #[default]
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format.
    WebP,
}

impl ImageFormat {
    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }
}

/// Parameters for one image request.
///
/// Every field except the prompt has a default matching what the batch
/// scripts have always sent: `dall-e-3`, `1024x1024`, `hd`, `vivid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// The text prompt describing the desired image.
    pub prompt: String,
    /// Model identifier.
    pub model: String,
    /// Pixel dimensions as `WIDTHxHEIGHT`.
    pub size: String,
    /// Quality tier (`standard` or `hd`).
    pub quality: String,
    /// Style tag (`vivid` or `natural`).
    pub style: String,
}

impl GenerationRequest {
    /// Creates a new request with the given prompt and default parameters.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: DEFAULT_MODEL.to_string(),
            size: DEFAULT_SIZE.to_string(),
            quality: DEFAULT_QUALITY.to_string(),
            style: DEFAULT_STYLE.to_string(),
        }
    }

    /// Sets the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the pixel dimensions.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    /// Sets the quality tier.
    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = quality.into();
        self
    }

    /// Sets the style tag.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }
}

/// How the image bytes were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Decoded from inline base64 data.
    Inline,
    /// Downloaded from a URL returned by the API.
    Url,
}

/// A generated image with its data and metadata.
#[derive(Debug, Clone)]
#[must_use = "generated image should be saved or processed"]
pub struct GeneratedImage {
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// Format detected from the bytes, if recognised.
    pub format: Option<ImageFormat>,
    /// Where the bytes came from.
    pub source: ImageSource,
    /// Model that produced the image.
    pub model: String,
    /// Round-trip duration in milliseconds.
    pub duration_ms: u64,
}

impl GeneratedImage {
    /// Creates a new generated image, detecting format from magic bytes.
    pub fn new(data: Vec<u8>, source: ImageSource, model: String, duration_ms: u64) -> Self {
        let format = ImageFormat::from_magic_bytes(&data);
        Self {
            data,
            format,
            source,
            model,
            duration_ms,
        }
    }

    /// Saves the image to the specified path.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, &self.data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 12] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: [u8; 12] = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0, 0, 0, 0, 0];
    const WEBP_MAGIC: [u8; 12] = *b"RIFF\x00\x00\x00\x00WEBP";

    #[test]
    fn test_format_from_magic_bytes() {
        assert_eq!(
            ImageFormat::from_magic_bytes(&PNG_MAGIC),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&JPEG_MAGIC),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&WEBP_MAGIC),
            Some(ImageFormat::WebP)
        );
        assert_eq!(ImageFormat::from_magic_bytes(b"short"), None);
    }

    #[test]
    fn test_request_defaults() {
        let req = GenerationRequest::new("A bold T");
        assert_eq!(req.model, "dall-e-3");
        assert_eq!(req.size, "1024x1024");
        assert_eq!(req.quality, "hd");
        assert_eq!(req.style, "vivid");
    }

    #[test]
    fn test_request_overrides() {
        let req = GenerationRequest::new("x")
            .with_model("gpt-image-1")
            .with_size("1792x1024")
            .with_quality("standard")
            .with_style("natural");
        assert_eq!(req.model, "gpt-image-1");
        assert_eq!(req.size, "1792x1024");
        assert_eq!(req.quality, "standard");
        assert_eq!(req.style, "natural");
    }

    #[test]
    fn test_generated_image_detects_format() {
        let image = GeneratedImage::new(PNG_MAGIC.to_vec(), ImageSource::Inline, "m".into(), 5);
        assert_eq!(image.format, Some(ImageFormat::Png));
        assert_eq!(image.data.len(), 12);
    }

    #[test]
    fn test_save_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        let image = GeneratedImage::new(vec![1, 2, 3], ImageSource::Url, "m".into(), 0);
        image.save(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    }
}
