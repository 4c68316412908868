//! Entry Line Parsing
//!
//! Recognizes the bold-key line shapes the convention and profile files
//! are written in:
//!
//! - `- **key** - description` (convention entries, dash separator optional)
//! - `- **Label**: value` (profile label lines)
//! - `- item` (plain bullet items)
//!
//! Lines that match none of the shapes are treated as prose and ignored
//! by callers, which is what keeps hand-edited files readable.

use std::sync::OnceLock;

use regex::Regex;

use crate::markdown::document::trim_eol;
use crate::models::{ConventionEntry, ConventionKind};

static ENTRY_LINE: OnceLock<Regex> = OnceLock::new();
static LABEL_LINE: OnceLock<Regex> = OnceLock::new();

fn entry_line_regex() -> &'static Regex {
    ENTRY_LINE.get_or_init(|| {
        Regex::new(r"^\s*(?:-\s+)?\*\*([^*]+)\*\*(?:\s*-\s+)?\s*(.*)$")
            .expect("entry line regex is valid")
    })
}

fn label_line_regex() -> &'static Regex {
    LABEL_LINE.get_or_init(|| {
        Regex::new(r"^\s*(?:-\s+)?\*\*([^*]+)\*\*\s*:\s*(.*)$")
            .expect("label line regex is valid")
    })
}

/// Parse one `- **key** - description` line into a convention entry.
///
/// The leading `-` bullet and the ` - ` separator are both optional, so
/// `**key** description` still parses. Returns `None` for prose lines.
pub fn parse_entry_line(line: &str) -> Option<ConventionEntry> {
    let text = trim_eol(line);
    let captures = entry_line_regex().captures(text)?;
    let key = captures.get(1)?.as_str().trim();
    if key.is_empty() {
        return None;
    }
    let description = captures.get(2).map(|m| m.as_str().trim()).unwrap_or("");
    Some(ConventionEntry::new(key, description))
}

/// Parse every entry line in a slice, skipping prose and blanks
pub fn parse_entries(lines: &[String]) -> Vec<ConventionEntry> {
    lines.iter().filter_map(|l| parse_entry_line(l)).collect()
}

/// Render an entry as the canonical `- **key** - description` line
pub fn format_entry(entry: &ConventionEntry) -> String {
    if entry.description.is_empty() {
        format!("- **{}**", entry.key)
    } else {
        format!("- **{}** - {}", entry.key, entry.description)
    }
}

/// Render a list of entries as canonical lines
pub fn render_entries(entries: &[ConventionEntry]) -> Vec<String> {
    entries.iter().map(format_entry).collect()
}

/// Render a complete single-convention file: `# <kind>` title, intro
/// sentence, then the entry lines. Used both when seeding a new file and
/// by the kinds that regenerate their whole file on every save.
pub fn render_convention_file(kind: ConventionKind, entries: &[ConventionEntry]) -> String {
    let mut lines = vec![
        format!("# {}", kind),
        String::new(),
        kind.file_intro().to_string(),
    ];
    if !entries.is_empty() {
        lines.push(String::new());
        lines.extend(render_entries(entries));
    }
    lines.push(String::new());
    lines.join("\n")
}

/// Parse a `**Label**: value` line into its label and value.
///
/// Used by the profile parsers for lines like `- **Username**: ada`.
pub fn parse_label_line(line: &str) -> Option<(String, String)> {
    let text = trim_eol(line);
    let captures = label_line_regex().captures(text)?;
    let label = captures.get(1)?.as_str().trim();
    if label.is_empty() {
        return None;
    }
    let value = captures.get(2).map(|m| m.as_str().trim()).unwrap_or("");
    Some((label.to_string(), value.to_string()))
}

/// Render a `- **Label**: value` line
pub fn format_label(label: &str, value: &str) -> String {
    format!("- **{}**: {}", label, value)
}

/// Parse a plain `- item` or `* item` bullet, returning the item text
pub fn parse_bullet_item(line: &str) -> Option<String> {
    let text = trim_eol(line).trim();
    let item = text
        .strip_prefix("- ")
        .or_else(|| text.strip_prefix("* "))?
        .trim();
    if item.is_empty() {
        return None;
    }
    Some(item.to_string())
}

/// Render a plain `- item` bullet
pub fn format_bullet(item: &str) -> String {
    format!("- {}", item)
}

/// Bullet items in a section body, prose skipped
pub fn collect_bullets(lines: &[String]) -> Vec<String> {
    lines.iter().filter_map(|line| parse_bullet_item(line)).collect()
}

/// Append `## title` plus its bullets to a line buffer, when there are any
pub fn push_bullet_section(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(format!("## {}", title));
    lines.push(String::new());
    lines.extend(items.iter().map(|item| format_bullet(item)));
}
