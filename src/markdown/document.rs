//! Markdown Document Buffer
//!
//! Line-oriented view of a markdown file used for in-place splicing.
//! The buffer splits on `\n` only, so lines of CRLF files keep their
//! trailing `\r` and untouched regions re-join byte-for-byte. Newly
//! written lines use plain `\n` endings.

use std::fs;
use std::path::Path;

use crate::utils::error::{AppError, AppResult};

/// A markdown file as an editable list of lines.
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Build a document from raw text
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(|l| l.to_string()).collect(),
        }
    }

    /// Read a document from disk.
    ///
    /// Fails with `FileNotFound` when the file is absent, so stores can
    /// surface the condition distinctly from a missing section.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.is_file() {
            return Err(AppError::file_not_found(path.display().to_string()));
        }
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// Write the full document back to disk.
    ///
    /// A plain read-splice-overwrite cycle: no locking, no temp-file swap,
    /// last writer wins (single-user tool).
    pub fn save(&self, path: &Path) -> AppResult<()> {
        fs::write(path, self.render())?;
        Ok(())
    }

    /// The line buffer
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Re-join the buffer into file text
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace the line at `index`
    pub fn replace_line(&mut self, index: usize, line: impl Into<String>) {
        self.lines[index] = line.into();
    }

    /// Insert a line before `index`
    pub fn insert_line(&mut self, index: usize, line: impl Into<String>) {
        self.lines.insert(index, line.into());
    }

    /// Remove the line at `index`
    pub fn remove_line(&mut self, index: usize) {
        self.lines.remove(index);
    }
}

/// A line without its end-of-line `\r`, for matching and parsing
pub fn trim_eol(line: &str) -> &str {
    line.trim_end_matches('\r')
}

/// Whether a line is empty or whitespace-only
pub fn is_blank(line: &str) -> bool {
    trim_eol(line).trim().is_empty()
}

/// Whether text would split across lines when written into the buffer
pub fn has_line_break(text: &str) -> bool {
    text.contains('\n') || text.contains('\r')
}
