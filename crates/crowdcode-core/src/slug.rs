const MAX_SLUG_CHARS: usize = 50;

/// Lower-cases a title and collapses non-alphanumeric runs into single dashes.
///
/// Leading and trailing separators are trimmed and the result is capped at 50
/// characters, so the slug is safe to embed in a directory name.
pub fn slugify_title(raw: &str) -> String {
    let mut slug = String::new();
    let mut separator_pending = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            if separator_pending && !slug.is_empty() {
                slug.push('-');
            }
            separator_pending = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            separator_pending = true;
        }
        if slug.len() >= MAX_SLUG_CHARS {
            break;
        }
    }
    slug.truncate(MAX_SLUG_CHARS);
    slug.trim_end_matches('-').to_string()
}
