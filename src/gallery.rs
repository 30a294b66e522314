//! Static HTML contact sheet for an output directory.

use crate::error::Result;
use crate::manifest::GeneratedItem;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Gallery filename inside an output directory.
pub const GALLERY_FILE: &str = "index.html";

const STYLE: &str = r#"  :root { color-scheme: dark; }
  body { margin: 24px; font: 14px/1.4 ui-sans-serif, system-ui; background: #0b0f14; color: #e8edf2; }
  h1 { font-size: 20px; margin: 0 0 8px; }
  p { margin: 0 0 18px; color: #b7c2cc; }
  .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 16px; }
  figure { margin: 0; padding: 12px; border: 1px solid #1e2a36; border-radius: 14px; background: #0f1620; }
  img { width: 100%; height: auto; border-radius: 10px; display: block; background: #ffffff; }
  figcaption { margin-top: 10px; color: #b7c2cc; }
  small { color: #8ea2b2; }"#;

/// Presentation knobs for [`render_gallery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryOptions {
    /// Document `<title>`.
    pub title: String,
    /// Page heading.
    pub heading: String,
    /// Add each item's prompt text under its title.
    pub show_prompts: bool,
    /// Output directory named in the subtitle, if any.
    pub location: Option<String>,
}

impl GalleryOptions {
    /// Creates options with the given title used for both `<title>` and heading.
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            heading: title.clone(),
            title,
            show_prompts: false,
            location: None,
        }
    }

    /// Sets the page heading.
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = heading.into();
        self
    }

    /// Toggles prompt text in captions.
    pub fn with_prompts(mut self, show: bool) -> Self {
        self.show_prompts = show;
        self
    }

    /// Names the output directory in the subtitle.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Renders the gallery document. One `<figure>` per item, in item order.
pub fn render_gallery(items: &[GeneratedItem], options: &GalleryOptions) -> String {
    let figures = items
        .iter()
        .map(|item| render_figure(item, options.show_prompts))
        .collect::<Vec<_>>()
        .join("\n");

    let subtitle = match &options.location {
        Some(location) => format!(
            "Generated concepts for review. Files are in <code>{}</code>.",
            escape(location)
        ),
        None => "Generated concepts for review.".to_string(),
    };

    format!(
        "<!doctype html>\n\
         <meta charset=\"utf-8\" />\n\
         <title>{title}</title>\n\
         <style>\n{STYLE}\n</style>\n\
         <h1>{heading}</h1>\n\
         <p>{subtitle}</p>\n\
         <div class=\"grid\">\n{figures}\n</div>\n",
        title = escape(&options.title),
        heading = escape(&options.heading),
    )
}

fn render_figure(item: &GeneratedItem, show_prompt: bool) -> String {
    let file = escape(&item.file);
    let mut caption = format!("<strong>{:02}.</strong> {}", item.id, escape(&item.title));
    if show_prompt {
        let _ = write!(caption, "<br/><small>{}</small>", escape(&item.prompt));
    }
    format!(
        "<figure>\n  <a href=\"{file}\"><img src=\"{file}\" loading=\"lazy\" /></a>\n  \
         <figcaption>{caption}</figcaption>\n</figure>"
    )
}

/// Writes `index.html` into `dir`, replacing any previous gallery.
pub fn write_gallery(
    dir: impl AsRef<Path>,
    items: &[GeneratedItem],
    options: &GalleryOptions,
) -> Result<PathBuf> {
    let path = dir.as_ref().join(GALLERY_FILE);
    std::fs::write(&path, render_gallery(items, options))?;
    tracing::debug!(path = %path.display(), figures = items.len(), "wrote gallery");
    Ok(path)
}

/// Escapes text for HTML element content and double-quoted attributes.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
