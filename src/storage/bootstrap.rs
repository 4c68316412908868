//! Project Bootstrap
//!
//! Seeds a project root with the convention files the stores expect.
//! Every write here is only-if-missing: re-running `init_project` on an
//! already initialized root changes nothing.

use std::fs;
use std::path::Path;

use crate::markdown::entries::render_convention_file;
use crate::models::{ConventionEntry, ConventionKind};
use crate::storage::paths::TotemPaths;
use crate::utils::error::AppResult;

/// Create the `.totem` directory tree and seed default convention files.
///
/// Idempotent: existing files are left untouched, so user edits survive a
/// re-init.
pub fn init_project(paths: &TotemPaths) -> AppResult<()> {
    paths.ensure_dirs()?;

    for kind in [
        ConventionKind::Status,
        ConventionKind::Priority,
        ConventionKind::Complexity,
    ] {
        let content = render_convention_file(kind, &default_entries(kind));
        seed_file(&paths.convention_file(kind), &content)?;
    }
    seed_file(&paths.id_file(), &default_id_file())?;

    Ok(())
}

/// Write `content` to `path` unless the file already exists
fn seed_file(path: &Path, content: &str) -> AppResult<()> {
    if path.exists() {
        tracing::debug!("bootstrap: {} already present, keeping", path.display());
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("bootstrap: seeded {}", path.display());
    Ok(())
}

/// Starter vocabulary for the single-file convention kinds
fn default_entries(kind: ConventionKind) -> Vec<ConventionEntry> {
    match kind {
        ConventionKind::Status => vec![
            ConventionEntry::new("open", "Ready for work, not started"),
            ConventionEntry::new("in-progress", "Actively being worked on"),
            ConventionEntry::new("blocked", "Waiting on another ticket or decision"),
            ConventionEntry::new("review", "Awaiting review"),
            ConventionEntry::new("done", "Completed and deployed"),
        ],
        ConventionKind::Priority => vec![
            ConventionEntry::new("critical", "Drop everything"),
            ConventionEntry::new("high", "Do this next"),
            ConventionEntry::new("medium", "Normal queue order"),
            ConventionEntry::new("low", "Nice to have"),
        ],
        ConventionKind::Complexity => vec![
            ConventionEntry::new("small", "Hours of work"),
            ConventionEntry::new("medium", "A day or two"),
            ConventionEntry::new("large", "Several days, consider splitting"),
        ],
        _ => Vec::new(),
    }
}

/// Starter `id.md` with the prefix scalar and the three spliced sections
fn default_id_file() -> String {
    let mut lines: Vec<String> = vec![
        "# Id".into(),
        String::new(),
        "Conventions used to compose ticket ids.".into(),
        String::new(),
        "## Prefix".into(),
        String::new(),
        "TOT".into(),
    ];
    for kind in [
        ConventionKind::Layer,
        ConventionKind::Component,
        ConventionKind::Feature,
    ] {
        lines.push(String::new());
        lines.push(format!("## {}", kind.section_name().unwrap_or_default()));
        lines.push(String::new());
        lines.push(kind.file_intro().into());
    }
    lines.push(String::new());
    lines.join("\n")
}
