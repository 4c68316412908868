//! Ticket Store
//!
//! One markdown file per ticket under `.totem/tickets/`, named by a slug
//! of the ticket id. The id inside the file is the record's identity; the
//! file name is only a storage detail, disambiguated with a numeric
//! suffix when two ids slug to the same name.

pub mod parser;

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::markdown::document::has_line_break;
use crate::models::Ticket;
use crate::storage::paths::{ensure_dir, TotemPaths};
use crate::utils::error::{AppError, AppResult};
use crate::utils::slug::slugify;

pub use parser::{parse_ticket, serialize_ticket};

/// File-per-record store for tickets.
#[derive(Debug, Clone)]
pub struct TicketStore {
    dir: PathBuf,
}

impl TicketStore {
    /// Create a store rooted at the given paths
    pub fn new(paths: &TotemPaths) -> Self {
        Self {
            dir: paths.tickets_dir(),
        }
    }

    /// All parseable tickets, sorted by id.
    ///
    /// A file that fails to parse is logged and skipped so one corrupt
    /// ticket never breaks the whole listing. A missing directory lists
    /// as empty.
    pub fn list(&self) -> AppResult<Vec<Ticket>> {
        let mut tickets: Vec<Ticket> = self.scan()?.into_iter().map(|(_, t)| t).collect();
        tickets.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(tickets)
    }

    /// The ticket with the given id, matched case-sensitively
    pub fn get(&self, id: &str) -> AppResult<Ticket> {
        self.find(id)?
            .map(|(_, ticket)| ticket)
            .ok_or_else(|| AppError::not_found(format!("ticket '{}' does not exist", id)))
    }

    /// Write a new ticket file.
    ///
    /// The id and title each occupy one line of the serialized record, so
    /// values containing line breaks are rejected up front.
    pub fn create(&self, ticket: &Ticket) -> AppResult<Ticket> {
        let id = ticket.id.trim();
        if id.is_empty() {
            return Err(AppError::bad_request("ticket id must not be empty"));
        }
        require_single_line(&ticket.id, "id")?;
        require_single_line(&ticket.title, "title")?;
        let slug = slugify(id);
        if slug.is_empty() {
            return Err(AppError::bad_request(format!(
                "ticket id '{}' has no usable characters for a file name",
                id
            )));
        }

        ensure_dir(&self.dir)?;
        if self.find(id)?.is_some() {
            return Err(AppError::conflict(format!("ticket '{}' already exists", id)));
        }

        let mut stored = ticket.clone();
        stored.id = id.to_string();

        let path = self.available_path(&slug);
        fs::write(&path, serialize_ticket(&stored))?;

        tracing::debug!("created ticket '{}' at {}", stored.id, path.display());
        Ok(stored)
    }

    /// Rewrite an existing ticket file with new content.
    ///
    /// The id is the record's identity and cannot change here; delete and
    /// recreate to rename.
    pub fn update(&self, id: &str, ticket: &Ticket) -> AppResult<Ticket> {
        if ticket.id != id {
            return Err(AppError::bad_request(format!(
                "ticket id cannot change on update ('{}' vs '{}')",
                ticket.id, id
            )));
        }
        require_single_line(&ticket.title, "title")?;

        let (path, _) = self
            .find(id)?
            .ok_or_else(|| AppError::not_found(format!("ticket '{}' does not exist", id)))?;
        fs::write(&path, serialize_ticket(ticket))?;

        tracing::debug!("updated ticket '{}'", id);
        Ok(ticket.clone())
    }

    /// Remove a ticket's backing file
    pub fn delete(&self, id: &str) -> AppResult<()> {
        let (path, _) = self
            .find(id)?
            .ok_or_else(|| AppError::not_found(format!("ticket '{}' does not exist", id)))?;
        fs::remove_file(&path)?;

        tracing::debug!("deleted ticket '{}'", id);
        Ok(())
    }

    /// Every parseable `(path, ticket)` pair in the directory
    fn scan(&self) -> AppResult<Vec<(PathBuf, Ticket)>> {
        let mut records = Vec::new();

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(records),
            Err(e) => return Err(AppError::Io(e)),
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
                continue;
            }
            let text = fs::read_to_string(&path)?;
            match parse_ticket(&text) {
                Ok(ticket) => records.push((path, ticket)),
                Err(e) => {
                    tracing::warn!("skipping unparseable ticket {}: {}", path.display(), e);
                }
            }
        }

        Ok(records)
    }

    /// The backing file of the ticket with this id, if any
    fn find(&self, id: &str) -> AppResult<Option<(PathBuf, Ticket)>> {
        Ok(self.scan()?.into_iter().find(|(_, t)| t.id == id))
    }

    /// First unclaimed `slug.md`, `slug-01.md`, `slug-02.md`, ...
    fn available_path(&self, slug: &str) -> PathBuf {
        let base = self.dir.join(format!("{}.md", slug));
        if !base.exists() {
            return base;
        }
        let mut suffix = 1u32;
        loop {
            let candidate = self.dir.join(format!("{}-{:02}.md", slug, suffix));
            if !candidate.exists() {
                return candidate;
            }
            suffix += 1;
        }
    }
}

/// A `field` value with a line break would corrupt the serialized layout
/// and parse back as a different record
fn require_single_line(value: &str, field: &str) -> AppResult<()> {
    if has_line_break(value) {
        return Err(AppError::bad_request(format!(
            "ticket {} must not contain line breaks",
            field
        )));
    }
    Ok(())
}
