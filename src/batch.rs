//! Sequential, resumable batch generation.

use crate::config::RunConfig;
use crate::error::Result;
use crate::gallery::write_gallery;
use crate::image::{ImageFormat, ImageProvider};
use crate::manifest::{write_manifest, GeneratedItem};
use crate::prompts::PromptRecord;
use crate::slug::output_filename;
use std::path::{Path, PathBuf};

/// Outcome of a completed batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Directory everything was written to.
    pub out_dir: PathBuf,
    /// Path of the rendered gallery.
    pub gallery: PathBuf,
    /// Manifest entries, one per prompt in input order.
    pub items: Vec<GeneratedItem>,
    /// Images requested from the provider.
    pub generated: usize,
    /// Images reused from disk.
    pub skipped: usize,
}

/// Generates one image per record, then writes the manifest and gallery.
///
/// Records are processed strictly in order and each request is awaited
/// before the next starts. The first failure aborts the run; images already
/// written stay on disk so a later run with skip-existing can pick up where
/// this one stopped. The manifest and gallery are only written once every
/// record has succeeded.
pub async fn run_batch<P>(
    provider: &P,
    records: &[PromptRecord],
    config: &RunConfig,
) -> Result<BatchReport>
where
    P: ImageProvider + ?Sized,
{
    std::fs::create_dir_all(&config.out_dir)?;

    let total = records.len();
    let mut items = Vec::with_capacity(total);
    let mut generated = 0;
    let mut skipped = 0;

    for (i, record) in records.iter().enumerate() {
        let position = i + 1;
        let file = output_filename(record.id, &record.title, config.max_slug_len);
        let path = config.out_dir.join(&file);

        if config.skip_existing && is_nonempty_file(&path) {
            tracing::info!(file = %file, "[{position}/{total}] (skip) {}", record.title);
            skipped += 1;
        } else {
            tracing::info!(file = %file, "[{position}/{total}] {}", record.title);
            let mut request = config.request.clone();
            request.prompt = record.prompt.clone();

            let image = provider.generate(&request).await?;
            if image.format != Some(ImageFormat::Png) {
                tracing::warn!(file = %file, format = ?image.format, "response is not a PNG");
            }
            image.save(&path)?;
            generated += 1;
        }

        items.push(GeneratedItem::from_record(record, file));
    }

    write_manifest(&config.out_dir, &items)?;
    let gallery = write_gallery(&config.out_dir, &items, &config.gallery_options(items.len()))?;

    tracing::debug!(generated, skipped, "batch complete");
    Ok(BatchReport {
        out_dir: config.out_dir.clone(),
        gallery,
        items,
        generated,
        skipped,
    })
}

fn is_nonempty_file(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}
