//! Slug normalization.
//!
//! DESIGN
//! ======
//! `slugify` is total: every input maps to a (possibly empty) string over
//! lowercase ASCII letters, digits, and single interior hyphens. Characters
//! outside `[A-Za-z0-9_]`, whitespace, and `-` are dropped rather than
//! transliterated, so accented names lose their accents (`"Café"` → `"caf"`).
//! Runs of whitespace, underscores, and hyphens collapse to one hyphen.

/// Normalize a display name into a URL-safe slug.
///
/// Guarantees: output contains only `[a-z0-9-]`, never starts or ends with a
/// hyphen, and never contains two hyphens in a row. Degenerate input (empty
/// string, punctuation only) yields the empty string.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch.to_ascii_lowercase());
            pending_hyphen = false;
        } else if ch.is_whitespace() || ch == '_' || ch == '-' {
            // Separator run: emit at most one hyphen, and only between words.
            pending_hyphen = true;
        }
        // Every other character (punctuation, symbols, non-ASCII letters) is
        // dropped without becoming a separator.
    }

    slug
}

#[cfg(test)]
#[path = "slug_test.rs"]
mod tests;
