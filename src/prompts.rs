//! Prompt file loading.

use crate::error::{GenSheetError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One entry of the prompt file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRecord {
    /// Numeric id, used as the filename prefix.
    pub id: i64,
    /// Display title, slugified into the filename.
    pub title: String,
    /// Text sent to the image API.
    pub prompt: String,
}

/// Reads a JSON array of [`PromptRecord`]s, preserving file order.
pub fn load_prompts(path: impl AsRef<Path>) -> Result<Vec<PromptRecord>> {
    let path = path.as_ref();
    let invalid = |reason: String| GenSheetError::InvalidPrompts {
        path: path.to_path_buf(),
        reason,
    };

    let text = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    let records = parse_prompts(&text).map_err(|e| invalid(e.to_string()))?;

    let mut seen = HashSet::new();
    for record in &records {
        if !seen.insert(record.id) {
            tracing::warn!(id = record.id, title = %record.title, "duplicate prompt id");
        }
    }

    tracing::debug!(path = %path.display(), count = records.len(), "loaded prompts");
    Ok(records)
}

/// Parses prompt records from a JSON string.
pub fn parse_prompts(text: &str) -> serde_json::Result<Vec<PromptRecord>> {
    serde_json::from_str(text)
}
