//! Slug Derivation
//!
//! Filesystem-safe identifiers derived from human-readable names and ids.
//! Record files (tickets, personas, contributors) are named by slug.

/// Derive a filesystem-safe slug from a name or id.
///
/// Lowercases, keeps alphanumerics, collapses whitespace and every other
/// character into single dashes, and trims leading/trailing dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;

    for c in name.chars() {
        if c.is_alphanumeric() {
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }

    slug
}
