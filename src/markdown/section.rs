//! Section Locator
//!
//! Finds `##` sections in a line buffer and reports their line spans, so
//! callers can edit one section while leaving every other byte of the
//! file untouched.

use crate::markdown::document::trim_eol;
use crate::utils::error::{AppError, AppResult};

/// Line span of a located `##` section.
///
/// `body_start..body_end` covers every line after the heading up to (but
/// not including) the next `##` heading, or end of file. Deeper `###`
/// headings belong to the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    /// Index of the `## Name` heading line
    pub heading: usize,
    /// First body line (may equal `body_end` for an empty section)
    pub body_start: usize,
    /// One past the last body line
    pub body_end: usize,
}

/// Locate the section introduced by `## {name}`.
///
/// The heading must match case-sensitively. Trailing whitespace on the
/// heading line is tolerated; `### {name}` is not a match.
pub fn locate_section(lines: &[String], name: &str) -> AppResult<SectionSpan> {
    let target = format!("## {}", name);
    let heading = lines
        .iter()
        .position(|line| trim_eol(line).trim_end() == target)
        .ok_or_else(|| AppError::section_not_found(format!("no '## {}' heading", name)))?;

    let body_start = heading + 1;
    let body_end = lines[body_start..]
        .iter()
        .position(|line| is_heading(line, 2))
        .map(|offset| body_start + offset)
        .unwrap_or(lines.len());

    Ok(SectionSpan {
        heading,
        body_start,
        body_end,
    })
}

/// A heading block found while outlining a document.
///
/// `start..end` covers the lines after the heading up to the next heading
/// of any level, so nested `###` blocks appear as separate entries after
/// their `##` parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBlock {
    /// Heading depth: 1 for `#`, 2 for `##`, 3 for `###`
    pub level: u8,
    pub title: String,
    /// First line after the heading
    pub start: usize,
    /// One past the last line before the next heading
    pub end: usize,
}

/// Outline a document into its `#` / `##` / `###` blocks, in file order
pub fn split_sections(lines: &[String]) -> Vec<SectionBlock> {
    let mut blocks: Vec<SectionBlock> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let Some((level, title)) = heading_title(line) else {
            continue;
        };
        if let Some(previous) = blocks.last_mut() {
            previous.end = index;
        }
        blocks.push(SectionBlock {
            level,
            title: title.to_string(),
            start: index + 1,
            end: lines.len(),
        });
    }

    blocks
}

/// First run of non-blank lines in a section body, joined as a paragraph
pub fn first_paragraph(lines: &[String]) -> String {
    let mut paragraph: Vec<&str> = Vec::new();
    for line in lines {
        let text = trim_eol(line).trim();
        if text.is_empty() {
            if paragraph.is_empty() {
                continue;
            }
            break;
        }
        paragraph.push(text);
    }
    paragraph.join("\n")
}

/// Whether the line is a heading of exactly `level`
fn is_heading(line: &str, level: u8) -> bool {
    heading_title(line).map(|(l, _)| l == level).unwrap_or(false)
}

/// Parse `# Title` / `## Title` / `### Title`, returning depth and title
fn heading_title(line: &str) -> Option<(u8, &str)> {
    let text = trim_eol(line);
    let hashes = text.chars().take_while(|c| *c == '#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    let rest = &text[hashes..];
    if !rest.starts_with(' ') {
        return None;
    }
    Some((hashes as u8, rest.trim()))
}
