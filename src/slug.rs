//! Free-text normalization for filenames.

/// Turns arbitrary text into a filesystem-safe token: lowercased, trimmed,
/// with every run of non-alphanumeric characters collapsed to a single
/// hyphen. Empty input yields an empty slug.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());

    for c in text.trim().to_lowercase().chars() {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }

    slug.trim_matches('-').to_string()
}
