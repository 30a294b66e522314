#![warn(missing_docs)]
//! GenSheet - batch image generation with a contact-sheet gallery.
//!
//! Reads an ordered list of `{id, title, prompt}` records, asks an image
//! API for one picture per record, stores each under a deterministic
//! filename, and renders a static `index.html` over the results.
//!
//! # Quick Start
//!
//! ```no_run
//! use gensheet::config::{Overrides, Preset, RunConfig};
//! use gensheet::{load_prompts, run_batch, OpenAiImageProvider};
//!
//! #[tokio::main]
//! async fn main() -> gensheet::Result<()> {
//!     let config = RunConfig::resolve(Preset::Concepts, Overrides::default());
//!     let provider = OpenAiImageProvider::builder()
//!         .timeout(config.timeout)
//!         .build()?;
//!     let prompts = load_prompts(&config.prompts_path)?;
//!     let report = run_batch(&provider, &prompts, &config).await?;
//!     println!("{}", report.gallery.display());
//!     Ok(())
//! }
//! ```
//!
//! # Resuming
//!
//! Pointing a run at an existing directory (`LATEST_OUT_DIR` or
//! [`config::Overrides::resume_dir`]) reuses every non-empty image already
//! there and only requests the missing ones.

mod error;

pub mod batch;
pub mod config;
pub mod gallery;
pub mod image;
pub mod manifest;
pub mod prompts;
pub mod slug;

// Re-export error types at crate root
pub use error::{
    GenSheetError, Result, EXIT_FAILURE, EXIT_MISSING_CREDENTIAL, EXIT_SUCCESS, PREVIEW_LIMIT,
};

pub use batch::{run_batch, BatchReport};
pub use gallery::{render_gallery, write_gallery, GalleryOptions};
pub use image::providers::{OpenAiImageProvider, OpenAiImageProviderBuilder};
pub use image::{GeneratedImage, GenerationRequest, ImageProvider};
pub use manifest::{read_manifest, write_manifest, GeneratedItem};
pub use prompts::{load_prompts, PromptRecord};
pub use slug::{output_filename, slugify};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{GenSheetError, Result};
    pub use crate::image::providers::OpenAiImageProvider;
    pub use crate::image::{GeneratedImage, GenerationRequest, ImageProvider};
    pub use crate::{load_prompts, run_batch, GeneratedItem, PromptRecord};
}
