//! The `generated.json` manifest.

use crate::error::Result;
use crate::prompts::PromptRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Manifest filename inside an output directory.
pub const MANIFEST_FILE: &str = "generated.json";

/// A prompt record plus the file it was rendered to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedItem {
    /// Id copied from the prompt record.
    pub id: i64,
    /// Title copied from the prompt record.
    pub title: String,
    /// Prompt text copied from the prompt record.
    pub prompt: String,
    /// Filename relative to the output directory.
    pub file: String,
}

impl GeneratedItem {
    /// Pairs a record with its output filename.
    pub fn from_record(record: &PromptRecord, file: impl Into<String>) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            prompt: record.prompt.clone(),
            file: file.into(),
        }
    }
}

/// Writes the manifest as a pretty-printed JSON array, replacing any
/// existing one.
pub fn write_manifest(dir: impl AsRef<Path>, items: &[GeneratedItem]) -> Result<()> {
    let path = dir.as_ref().join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(items)?;
    std::fs::write(&path, json)?;
    tracing::debug!(path = %path.display(), entries = items.len(), "wrote manifest");
    Ok(())
}

/// Reads the manifest from an output directory.
pub fn read_manifest(dir: impl AsRef<Path>) -> Result<Vec<GeneratedItem>> {
    let text = std::fs::read_to_string(dir.as_ref().join(MANIFEST_FILE))?;
    Ok(serde_json::from_str(&text)?)
}
