//! Totem Path Configuration
//!
//! Resolves every backing file of the markdown store from one project root.
//! Stores receive a `TotemPaths` at construction; there is no global path
//! state and no `current_dir` lookup outside `from_env`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::ConventionKind;
use crate::utils::error::AppResult;

/// Environment variable overriding the project root for `from_env`
pub const TOTEM_ROOT_ENV: &str = "TOTEM_ROOT";

/// Directory layout of a Totem project.
///
/// All entity files live under `<root>/.totem/`:
/// `projects/conventions/` for the convention vocabularies, `tickets/`,
/// `personas/` and `contributors/` for the record collections.
#[derive(Debug, Clone)]
pub struct TotemPaths {
    root: PathBuf,
}

impl TotemPaths {
    /// Create a path configuration rooted at the given project directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the root from `TOTEM_ROOT`, falling back to the current
    /// working directory
    pub fn from_env() -> AppResult<Self> {
        match env::var(TOTEM_ROOT_ENV) {
            Ok(root) if !root.trim().is_empty() => Ok(Self::new(root)),
            _ => Ok(Self::new(env::current_dir()?)),
        }
    }

    /// `<root>/.totem`
    pub fn totem_dir(&self) -> PathBuf {
        self.root.join(".totem")
    }

    /// `<root>/.totem/projects/conventions`
    pub fn conventions_dir(&self) -> PathBuf {
        self.totem_dir().join("projects").join("conventions")
    }

    /// Backing file for a convention kind (`status.md`, …, or the shared
    /// `id.md` for the sectioned kinds)
    pub fn convention_file(&self, kind: ConventionKind) -> PathBuf {
        self.conventions_dir().join(kind.file_name())
    }

    /// `<root>/.totem/projects/conventions/id.md`
    pub fn id_file(&self) -> PathBuf {
        self.conventions_dir().join("id.md")
    }

    /// `<root>/.totem/tickets`
    pub fn tickets_dir(&self) -> PathBuf {
        self.totem_dir().join("tickets")
    }

    /// `<root>/.totem/personas`
    pub fn personas_dir(&self) -> PathBuf {
        self.totem_dir().join("personas")
    }

    /// `<root>/.totem/contributors`
    pub fn contributors_dir(&self) -> PathBuf {
        self.totem_dir().join("contributors")
    }

    /// Create the full directory tree if missing
    pub fn ensure_dirs(&self) -> AppResult<()> {
        ensure_dir(&self.conventions_dir())?;
        ensure_dir(&self.tickets_dir())?;
        ensure_dir(&self.personas_dir())?;
        ensure_dir(&self.contributors_dir())?;
        Ok(())
    }
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
