//! Run configuration: presets, environment lookups, output directory choice.

use crate::gallery::GalleryOptions;
use crate::image::GenerationRequest;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming a directory to resume into.
pub const RESUME_DIR_ENV: &str = "LATEST_OUT_DIR";

/// Default root for timestamped output directories.
pub const DEFAULT_OUT_ROOT: &str = "out";

/// Timestamp layout for fresh output directories.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Per-request timeout used unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Named campaign presets. They differ only in defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Logo concepts: prompts shown in captions, fresh directory per run.
    #[default]
    Concepts,
    /// Lockups: title-only captions, skips files that already exist.
    Lockups,
}

impl Preset {
    /// Returns the preset name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Concepts => "concepts",
            Self::Lockups => "lockups",
        }
    }

    /// Prompt file read when none is given.
    pub fn prompts_file(&self) -> &'static str {
        match self {
            Self::Concepts => "prompts.json",
            Self::Lockups => "prompts2-lockup.json",
        }
    }

    /// Maximum slug length in output filenames.
    pub fn max_slug_len(&self) -> usize {
        match self {
            Self::Concepts => 60,
            Self::Lockups => 70,
        }
    }

    /// Whether existing non-empty files are reused even without a resume directory.
    pub fn skip_existing(&self) -> bool {
        matches!(self, Self::Lockups)
    }

    /// Whether captions include the prompt text.
    pub fn show_prompts(&self) -> bool {
        matches!(self, Self::Concepts)
    }

    /// Whether the subtitle names the output directory.
    pub fn show_location(&self) -> bool {
        matches!(self, Self::Concepts)
    }

    /// Default document title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Concepts => "Logo Exploration",
            Self::Lockups => "Logo Exploration (Lockups)",
        }
    }

    /// Heading noun phrase, prefixed with the item count.
    pub fn heading_suffix(&self) -> &'static str {
        match self {
            Self::Concepts => "Logo Concepts (PNG)",
            Self::Lockups => "Lockup Concepts (B/W PNG)",
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved settings for one batch run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Preset the remaining defaults came from.
    pub preset: Preset,
    /// Prompt file to read.
    pub prompts_path: PathBuf,
    /// Directory images, manifest and gallery are written to.
    pub out_dir: PathBuf,
    /// Reuse non-empty files already at the target path.
    pub skip_existing: bool,
    /// Maximum slug length in filenames.
    pub max_slug_len: usize,
    /// Template for each image request; the prompt is filled in per record.
    pub request: GenerationRequest,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Document title override.
    pub title: Option<String>,
}

/// Optional overrides layered over a [`Preset`].
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Prompt file path.
    pub prompts: Option<PathBuf>,
    /// Root for timestamped directories.
    pub out_root: Option<PathBuf>,
    /// Existing directory to resume into.
    pub resume_dir: Option<PathBuf>,
    /// Model identifier.
    pub model: Option<String>,
    /// Pixel dimensions.
    pub size: Option<String>,
    /// Quality tier.
    pub quality: Option<String>,
    /// Style tag.
    pub style: Option<String>,
    /// Timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Gallery title.
    pub title: Option<String>,
}

impl RunConfig {
    /// Resolves a config from a preset and overrides. A resume directory
    /// comes from the overrides first, then `LATEST_OUT_DIR`; when present
    /// it is used as the output directory and always enables skip-existing.
    /// Otherwise a fresh `<out_root>/<timestamp>` directory is chosen.
    pub fn resolve(preset: Preset, overrides: Overrides) -> Self {
        let resume_dir = overrides.resume_dir.or_else(resume_dir_from_env);

        let (out_dir, skip_existing) = match resume_dir {
            Some(dir) => (dir, true),
            None => {
                let root = overrides
                    .out_root
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_ROOT));
                (timestamped_dir(&root), preset.skip_existing())
            }
        };

        let mut request = GenerationRequest::new("");
        if let Some(model) = overrides.model {
            request = request.with_model(model);
        }
        if let Some(size) = overrides.size {
            request = request.with_size(size);
        }
        if let Some(quality) = overrides.quality {
            request = request.with_quality(quality);
        }
        if let Some(style) = overrides.style {
            request = request.with_style(style);
        }

        Self {
            preset,
            prompts_path: overrides
                .prompts
                .unwrap_or_else(|| PathBuf::from(preset.prompts_file())),
            out_dir,
            skip_existing,
            max_slug_len: preset.max_slug_len(),
            request,
            timeout: overrides
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            title: overrides.title,
        }
    }

    /// Gallery options for `count` items written to this config's directory.
    pub fn gallery_options(&self, count: usize) -> GalleryOptions {
        gallery_options(self.preset, self.title.as_deref(), &self.out_dir, count)
    }
}

/// Gallery options for a preset, optionally overriding the title.
pub fn gallery_options(
    preset: Preset,
    title: Option<&str>,
    out_dir: &Path,
    count: usize,
) -> GalleryOptions {
    let mut options = GalleryOptions::new(title.unwrap_or(preset.title()))
        .with_heading(format!("{count} {}", preset.heading_suffix()))
        .with_prompts(preset.show_prompts());
    if preset.show_location() {
        options = options.with_location(display_path(out_dir));
    }
    options
}

/// Reads `LATEST_OUT_DIR`, treating blank values as unset.
pub fn resume_dir_from_env() -> Option<PathBuf> {
    std::env::var(RESUME_DIR_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// `<root>/<local timestamp>`.
pub fn timestamped_dir(root: &Path) -> PathBuf {
    root.join(chrono::Local::now().format(TIMESTAMP_FORMAT).to_string())
}

/// Forward-slash rendering of a path for display in HTML.
fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_preset_defaults() {
        assert_eq!(Preset::Concepts.prompts_file(), "prompts.json");
        assert_eq!(Preset::Lockups.prompts_file(), "prompts2-lockup.json");
        assert_eq!(Preset::Concepts.max_slug_len(), 60);
        assert_eq!(Preset::Lockups.max_slug_len(), 70);
        assert!(!Preset::Concepts.skip_existing());
        assert!(Preset::Lockups.skip_existing());
        assert!(Preset::Concepts.show_prompts());
        assert!(!Preset::Lockups.show_prompts());
        assert_eq!(Preset::Lockups.to_string(), "lockups");
    }

    #[test]
    #[serial]
    fn test_resolve_fresh_directory() {
        std::env::remove_var(RESUME_DIR_ENV);
        let config = RunConfig::resolve(
            Preset::Concepts,
            Overrides {
                out_root: Some(PathBuf::from("runs")),
                ..Default::default()
            },
        );

        assert!(config.out_dir.starts_with("runs"));
        let stamp = config.out_dir.file_name().unwrap().to_str().unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).is_ok());
        assert!(!config.skip_existing);
        assert_eq!(config.prompts_path, PathBuf::from("prompts.json"));
        assert_eq!(config.request, GenerationRequest::new(""));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    #[serial]
    fn test_resolve_resume_from_env() {
        std::env::set_var(RESUME_DIR_ENV, "  out/previous  ");
        let config = RunConfig::resolve(Preset::Concepts, Overrides::default());
        std::env::remove_var(RESUME_DIR_ENV);

        assert_eq!(config.out_dir, PathBuf::from("out/previous"));
        assert!(config.skip_existing);
    }

    #[test]
    #[serial]
    fn test_blank_resume_env_is_ignored() {
        std::env::set_var(RESUME_DIR_ENV, "   ");
        assert_eq!(resume_dir_from_env(), None);
        std::env::remove_var(RESUME_DIR_ENV);
    }

    #[test]
    #[serial]
    fn test_explicit_resume_dir_wins_over_env() {
        std::env::set_var(RESUME_DIR_ENV, "from-env");
        let config = RunConfig::resolve(
            Preset::Lockups,
            Overrides {
                resume_dir: Some(PathBuf::from("from-flag")),
                ..Default::default()
            },
        );
        std::env::remove_var(RESUME_DIR_ENV);
        assert_eq!(config.out_dir, PathBuf::from("from-flag"));
    }

    #[test]
    #[serial]
    fn test_request_overrides() {
        std::env::remove_var(RESUME_DIR_ENV);
        let config = RunConfig::resolve(
            Preset::Lockups,
            Overrides {
                model: Some("gpt-image-1".into()),
                quality: Some("standard".into()),
                timeout_secs: Some(30),
                ..Default::default()
            },
        );
        assert_eq!(config.request.model, "gpt-image-1");
        assert_eq!(config.request.quality, "standard");
        assert_eq!(config.request.size, "1024x1024");
        assert_eq!(config.request.style, "vivid");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.skip_existing);
    }

    #[test]
    fn test_gallery_options_per_preset() {
        let dir = Path::new("out/run");
        let concepts = gallery_options(Preset::Concepts, None, dir, 50);
        assert_eq!(concepts.title, "Logo Exploration");
        assert_eq!(concepts.heading, "50 Logo Concepts (PNG)");
        assert!(concepts.show_prompts);
        assert_eq!(concepts.location.as_deref(), Some("out/run"));

        let lockups = gallery_options(Preset::Lockups, Some("T Alchemy"), dir, 2);
        assert_eq!(lockups.title, "T Alchemy");
        assert_eq!(lockups.heading, "2 Lockup Concepts (B/W PNG)");
        assert!(!lockups.show_prompts);
        assert_eq!(lockups.location, None);
    }
}
