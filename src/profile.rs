//! Profile naming. The shell owns the configured set of display names;
//! storage only ever sees the lowercase slug form.

/// Slug for a profile display name ("Robin" -> "robin").
pub fn profile_slug(display_name: &str) -> String {
    display_name.trim().to_lowercase()
}

/// Slugs end up in storage paths, so reject anything that could escape the
/// notes directory or name an unreadable file.
pub fn is_valid_profile_slug(slug: &str) -> bool {
    if slug.is_empty() || slug == "." || slug == ".." {
        return false;
    }
    !slug
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_whitespace())
}
