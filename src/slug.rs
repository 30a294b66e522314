//! Filename slugs derived from prompt titles.

/// Slug used when a title has no usable characters.
pub const DEFAULT_SLUG: &str = "logo";

/// Normalizes a title into `[a-z0-9-]`.
///
/// Every run of other characters becomes a single `-`, and leading or
/// trailing separators are dropped. Never fails; a title with nothing left
/// maps to [`DEFAULT_SLUG`].
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_sep = false;

    for c in text.trim().chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(c);
        } else {
            pending_sep = true;
        }
    }

    if slug.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        slug
    }
}

/// Builds the output filename for a prompt: zero-padded id, slug truncated
/// to `max_slug_len` bytes, `.png` extension.
///
/// Truncation can leave a trailing `-`; it is kept so names stay identical
/// to ones written by earlier runs.
pub fn output_filename(id: i64, title: &str, max_slug_len: usize) -> String {
    let slug = slugify(title);
    // slug is pure ASCII, so any byte index is a char boundary
    let cut = slug.len().min(max_slug_len);
    format!("{:02}-{}.png", id, &slug[..cut])
}
