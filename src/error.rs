//! Error types for batch generation.

use std::path::PathBuf;

/// Longest payload excerpt carried by [`GenSheetError::UnexpectedResponse`].
pub const PREVIEW_LIMIT: usize = 500;

/// Exit code for a successful run.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit code for any failure other than a missing credential.
pub const EXIT_FAILURE: u8 = 1;

/// Exit code when the API credential is not configured.
pub const EXIT_MISSING_CREDENTIAL: u8 = 2;

/// Errors that can occur while generating a batch.
#[derive(Debug, thiserror::Error)]
pub enum GenSheetError {
    /// Required credential environment variable is missing or empty.
    #[error("Missing {0}")]
    MissingCredential(String),

    /// The image API rejected the request.
    #[error("OpenAI Images API failed ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport failure talking to the image API.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Fetching the image from the returned URL failed.
    #[error("Failed to download image from {url}: {reason}")]
    Download { url: String, reason: String },

    /// The API answered 2xx but with neither image data nor a URL.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Failed to decode base64 data.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// The prompt file could not be read or parsed.
    #[error("invalid prompt file {}: {reason}", .path.display())]
    InvalidPrompts { path: PathBuf, reason: String },

    /// I/O error (e.g., writing an image).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenSheetError {
    /// Builds an [`GenSheetError::UnexpectedResponse`] from a raw payload,
    /// keeping at most [`PREVIEW_LIMIT`] characters of it.
    pub fn unexpected(payload: &str) -> Self {
        Self::UnexpectedResponse(preview(payload))
    }

    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::MissingCredential(_) => EXIT_MISSING_CREDENTIAL,
            _ => EXIT_FAILURE,
        }
    }
}

/// Truncates `text` to [`PREVIEW_LIMIT`] characters.
pub(crate) fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_LIMIT) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Result type alias for batch generation operations.
pub type Result<T> = std::result::Result<T, GenSheetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            GenSheetError::MissingCredential("OPENAI_API_KEY".into()).exit_code(),
            EXIT_MISSING_CREDENTIAL
        );
        assert_eq!(GenSheetError::unexpected("{}").exit_code(), EXIT_FAILURE);
        assert_eq!(
            GenSheetError::Api {
                status: 500,
                message: "boom".into()
            }
            .exit_code(),
            EXIT_FAILURE
        );
        assert_ne!(EXIT_SUCCESS, EXIT_FAILURE);
        assert_ne!(EXIT_FAILURE, EXIT_MISSING_CREDENTIAL);
    }

    #[test]
    fn test_unexpected_truncates_preview() {
        let long = "x".repeat(PREVIEW_LIMIT + 100);
        match GenSheetError::unexpected(&long) {
            GenSheetError::UnexpectedResponse(p) => assert_eq!(p.len(), PREVIEW_LIMIT),
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let text = "é".repeat(PREVIEW_LIMIT + 1);
        let p = preview(&text);
        assert_eq!(p.chars().count(), PREVIEW_LIMIT);
    }

    #[test]
    fn test_error_display() {
        let err = GenSheetError::Api {
            status: 400,
            message: "bad prompt".into(),
        };
        assert_eq!(err.to_string(), "OpenAI Images API failed (400): bad prompt");

        let err = GenSheetError::MissingCredential("OPENAI_API_KEY".into());
        assert_eq!(err.to_string(), "Missing OPENAI_API_KEY");

        let err = GenSheetError::unexpected("{}");
        assert_eq!(err.to_string(), "Unexpected response: {}");
    }
}
