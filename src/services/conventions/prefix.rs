//! Prefix Store
//!
//! The ticket-id prefix is a single scalar, not a keyed list: the first
//! non-blank line inside `## Prefix` of `id.md`. At most 6 characters from
//! `[A-Za-z0-9_-]`, always surfaced uppercase.

use std::path::PathBuf;

use crate::markdown::document::{is_blank, trim_eol, Document};
use crate::markdown::section::locate_section;
use crate::storage::paths::TotemPaths;
use crate::utils::error::{AppError, AppResult};

/// Longest prefix the id scheme accepts
pub const MAX_PREFIX_LEN: usize = 6;

/// Store for the single ticket-id prefix value.
#[derive(Debug, Clone)]
pub struct PrefixStore {
    file: PathBuf,
}

impl PrefixStore {
    /// Create a store rooted at the given paths
    pub fn new(paths: &TotemPaths) -> Self {
        Self {
            file: paths.id_file(),
        }
    }

    /// The current prefix, sanitized, uppercased and capped at 6 chars.
    ///
    /// Stored values are cleaned on the way out, so a hand-edited file with
    /// stray punctuation still yields a usable prefix.
    pub fn get(&self) -> AppResult<String> {
        let doc = Document::load(&self.file)?;
        let span = locate_section(doc.lines(), "Prefix")?;

        let raw = doc.lines()[span.body_start..span.body_end]
            .iter()
            .find(|line| !is_blank(line))
            .map(|line| trim_eol(line))
            .unwrap_or("");

        let mut prefix = sanitize_prefix(raw);
        prefix.truncate(MAX_PREFIX_LEN);
        if prefix.is_empty() {
            return Err(AppError::bad_request("prefix is not set"));
        }
        Ok(prefix)
    }

    /// Overwrite the prefix.
    ///
    /// Only the first non-blank line of the section changes (one is inserted
    /// if the section is empty); blank-line padding stays untouched.
    pub fn set(&self, new_prefix: &str) -> AppResult<String> {
        if new_prefix.chars().any(char::is_whitespace) {
            return Err(AppError::bad_request(
                "prefix must not contain whitespace",
            ));
        }
        let prefix = sanitize_prefix(new_prefix);
        if prefix.is_empty() {
            return Err(AppError::bad_request(
                "prefix must contain at least one of [A-Za-z0-9_-]",
            ));
        }
        if prefix.len() > MAX_PREFIX_LEN {
            return Err(AppError::bad_request(format!(
                "prefix must be at most {} characters",
                MAX_PREFIX_LEN
            )));
        }

        let mut doc = Document::load(&self.file)?;
        let span = locate_section(doc.lines(), "Prefix")?;

        let value_line = (span.body_start..span.body_end)
            .find(|&index| !is_blank(&doc.lines()[index]));
        match value_line {
            Some(index) => doc.replace_line(index, prefix.clone()),
            None => {
                let body = &doc.lines()[span.body_start..span.body_end];
                let insert_at = if body.first().map(|line| is_blank(line)).unwrap_or(false) {
                    span.body_start + 1
                } else {
                    span.body_start
                };
                doc.insert_line(insert_at, prefix.clone());
            }
        }
        doc.save(&self.file)?;

        tracing::debug!("set ticket prefix to '{}'", prefix);
        Ok(prefix)
    }
}

/// Drop whitespace and anything outside `[A-Za-z0-9_-]`, then uppercase
fn sanitize_prefix(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
