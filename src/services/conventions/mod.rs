//! Convention Store
//!
//! One store over all six keyed convention vocabularies. The kind decides
//! the backing file and the rewrite discipline: status, priority and
//! complexity own their file and regenerate it wholesale on every save;
//! layer, component and feature are sections of the shared `id.md` and are
//! spliced in place, leaving every other byte of the file untouched.

pub mod prefix;

use std::fs;
use std::path::PathBuf;

use crate::markdown::document::{has_line_break, is_blank, Document};
use crate::markdown::entries::{
    format_entry, parse_entries, parse_entry_line, render_convention_file,
};
use crate::markdown::section::locate_section;
use crate::models::{ConventionEntry, ConventionKind, EntryUpdate};
use crate::storage::paths::TotemPaths;
use crate::utils::error::{AppError, AppResult};

pub use prefix::PrefixStore;

/// Keyed entry store for one convention kind.
#[derive(Debug, Clone)]
pub struct ConventionStore {
    kind: ConventionKind,
    file: PathBuf,
}

impl ConventionStore {
    /// Create a store for `kind` rooted at the given paths
    pub fn new(paths: &TotemPaths, kind: ConventionKind) -> Self {
        Self {
            kind,
            file: paths.convention_file(kind),
        }
    }

    /// All entries, in file order
    pub fn get_all(&self) -> AppResult<Vec<ConventionEntry>> {
        let doc = Document::load(&self.file)?;
        let (start, end) = self.entry_range(&doc)?;
        Ok(parse_entries(&doc.lines()[start..end]))
    }

    /// Entry with the given key, matched case-insensitively
    pub fn get_by_key(&self, key: &str) -> AppResult<ConventionEntry> {
        self.get_all()?
            .into_iter()
            .find(|entry| entry.key_matches(key))
            .ok_or_else(|| {
                AppError::not_found(format!("{} entry '{}' does not exist", self.kind, key))
            })
    }

    /// Append a new entry at the end of the section body.
    ///
    /// Existing lines are preserved exactly; the new line goes after the
    /// last non-blank line so trailing blank padding stays where it was.
    /// Keys and descriptions must fit on one entry line: line breaks are
    /// rejected, as is `*` in the key.
    pub fn add(&self, entry: &ConventionEntry) -> AppResult<ConventionEntry> {
        self.validate_key(&entry.key)?;
        self.validate_description(&entry.description)?;
        let key = entry.key.trim();

        let mut doc = Document::load(&self.file)?;
        let (start, end) = self.entry_range(&doc)?;

        if parse_entries(&doc.lines()[start..end])
            .iter()
            .any(|existing| existing.key_matches(key))
        {
            return Err(AppError::conflict(format!(
                "{} entry '{}' already exists",
                self.kind, key
            )));
        }

        let stored = ConventionEntry::new(key, entry.description.trim());
        let insert_at = self.insertion_index(&doc, start, end);
        doc.insert_line(insert_at, format_entry(&stored));
        self.persist(&doc)?;

        tracing::debug!("added {} entry '{}'", self.kind, stored.key);
        Ok(stored)
    }

    /// Replace an entry's description (and optionally its key) in place.
    ///
    /// The entry keeps its position; renaming onto another existing key is
    /// rejected rather than silently creating a duplicate.
    pub fn update(&self, key: &str, update: &EntryUpdate) -> AppResult<ConventionEntry> {
        self.validate_description(&update.description)?;
        if let Some(renamed) = &update.new_key {
            self.validate_key(renamed)?;
        }

        let mut doc = Document::load(&self.file)?;
        let (start, end) = self.entry_range(&doc)?;

        let line_index = self.find_entry_line(&doc, start, end, key).ok_or_else(|| {
            AppError::not_found(format!("{} entry '{}' does not exist", self.kind, key))
        })?;

        let new_key = match &update.new_key {
            Some(renamed) => {
                let renamed = renamed.trim();
                if !renamed.eq_ignore_ascii_case(key) {
                    let collides = parse_entries(&doc.lines()[start..end])
                        .iter()
                        .any(|existing| existing.key_matches(renamed));
                    if collides {
                        return Err(AppError::conflict(format!(
                            "{} entry '{}' already exists",
                            self.kind, renamed
                        )));
                    }
                }
                renamed.to_string()
            }
            None => {
                // keep the stored casing, not the lookup casing
                parse_entry_line(&doc.lines()[line_index])
                    .map(|entry| entry.key)
                    .unwrap_or_else(|| key.to_string())
            }
        };

        let updated = ConventionEntry::new(new_key, update.description.trim());
        doc.replace_line(line_index, format_entry(&updated));
        self.persist(&doc)?;

        tracing::debug!("updated {} entry '{}'", self.kind, updated.key);
        Ok(updated)
    }

    /// Remove the entry with the given key
    pub fn delete(&self, key: &str) -> AppResult<()> {
        let mut doc = Document::load(&self.file)?;
        let (start, end) = self.entry_range(&doc)?;

        let line_index = self.find_entry_line(&doc, start, end, key).ok_or_else(|| {
            AppError::not_found(format!("{} entry '{}' does not exist", self.kind, key))
        })?;

        doc.remove_line(line_index);
        self.persist(&doc)?;

        tracing::debug!("deleted {} entry '{}'", self.kind, key);
        Ok(())
    }

    /// Reject keys the `- **key** - description` line cannot encode: the
    /// entry pattern stops at `*`, and a line break would end the line early
    fn validate_key(&self, key: &str) -> AppResult<()> {
        if key.trim().is_empty() {
            return Err(AppError::bad_request(format!(
                "{} key must not be empty",
                self.kind
            )));
        }
        if key.contains('*') {
            return Err(AppError::bad_request(format!(
                "{} key must not contain '*'",
                self.kind
            )));
        }
        if has_line_break(key) {
            return Err(AppError::bad_request(format!(
                "{} key must not contain line breaks",
                self.kind
            )));
        }
        Ok(())
    }

    /// Reject descriptions that would spill onto extra lines
    fn validate_description(&self, description: &str) -> AppResult<()> {
        if has_line_break(description) {
            return Err(AppError::bad_request(format!(
                "{} description must not contain line breaks",
                self.kind
            )));
        }
        Ok(())
    }

    /// Line range holding this kind's entries: the located section body for
    /// spliced kinds, the whole file for regenerated kinds
    fn entry_range(&self, doc: &Document) -> AppResult<(usize, usize)> {
        match self.kind.section_name() {
            Some(name) => {
                let span = locate_section(doc.lines(), name)?;
                Ok((span.body_start, span.body_end))
            }
            None => Ok((0, doc.lines().len())),
        }
    }

    /// Index the next entry line should be inserted at: after the last
    /// non-blank line of the range, or right after a leading blank when the
    /// range holds nothing yet
    fn insertion_index(&self, doc: &Document, start: usize, end: usize) -> usize {
        let body = &doc.lines()[start..end];
        match body.iter().rposition(|line| !is_blank(line)) {
            Some(last) => start + last + 1,
            None => {
                if body.first().map(|line| is_blank(line)).unwrap_or(false) {
                    start + 1
                } else {
                    start
                }
            }
        }
    }

    /// Line index of the entry matching `key` within the range
    fn find_entry_line(&self, doc: &Document, start: usize, end: usize, key: &str) -> Option<usize> {
        (start..end).find(|&index| {
            parse_entry_line(&doc.lines()[index])
                .map(|entry| entry.key_matches(key))
                .unwrap_or(false)
        })
    }

    /// Write the mutated buffer back, honoring the kind's discipline
    fn persist(&self, doc: &Document) -> AppResult<()> {
        if self.kind.is_regenerated() {
            let entries = parse_entries(doc.lines());
            fs::write(&self.file, render_convention_file(self.kind, &entries))?;
        } else {
            doc.save(&self.file)?;
        }
        Ok(())
    }
}
