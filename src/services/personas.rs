//! Persona Store
//!
//! One markdown file per persona under `.totem/personas/`, named by the
//! slug of the persona name. The format is a `# Name` title, an optional
//! description paragraph, and a fixed vocabulary of `##` bullet sections,
//! with `## Domain Context` holding arbitrary `###` sub-sections. Unknown
//! headings are ignored so hand-added sections survive a read.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::markdown::document::{has_line_break, Document};
use crate::markdown::entries::{collect_bullets, format_bullet, push_bullet_section};
use crate::markdown::section::{first_paragraph, split_sections};
use crate::models::{DomainContext, Persona};
use crate::storage::paths::{ensure_dir, TotemPaths};
use crate::utils::error::{AppError, AppResult};
use crate::utils::slug::slugify;

/// Parse a persona markdown document.
///
/// Only the `# Name` heading is required. `Review Checklist` is the
/// canonical heading for the checklist but `Code Review` and `Review`
/// are accepted on read.
pub fn parse_persona(text: &str) -> AppResult<Persona> {
    let doc = Document::parse(text);
    let blocks = split_sections(doc.lines());

    let title = blocks
        .first()
        .filter(|block| block.level == 1)
        .ok_or_else(|| AppError::parse("persona has no '# Name' heading"))?;
    let mut persona = Persona::new(title.title.clone());
    persona.description = first_paragraph(&doc.lines()[title.start..title.end]);

    let mut index = 1;
    while index < blocks.len() {
        let block = &blocks[index];
        if block.level != 2 {
            index += 1;
            continue;
        }
        let body = &doc.lines()[block.start..block.end];
        match block.title.as_str() {
            "Decision Framework" => persona.decision_framework = collect_bullets(body),
            "Code Patterns" => persona.code_patterns = collect_bullets(body),
            "Requirements Patterns" => persona.requirements_patterns = collect_bullets(body),
            "Review Checklist" | "Code Review" | "Review" => {
                persona.review_checklist = collect_bullets(body)
            }
            "Domain Context" => {
                let mut next = index + 1;
                while next < blocks.len() && blocks[next].level == 3 {
                    let context = &blocks[next];
                    persona.domain_contexts.push(DomainContext {
                        name: context.title.clone(),
                        notes: collect_bullets(&doc.lines()[context.start..context.end]),
                    });
                    next += 1;
                }
                index = next;
                continue;
            }
            _ => {}
        }
        index += 1;
    }

    Ok(persona)
}

/// Render a persona in canonical shape, omitting empty sections
pub fn serialize_persona(persona: &Persona) -> String {
    let mut lines: Vec<String> = vec![format!("# {}", persona.name)];

    if !persona.description.is_empty() {
        lines.push(String::new());
        lines.push(persona.description.clone());
    }

    push_bullet_section(&mut lines, "Decision Framework", &persona.decision_framework);
    push_bullet_section(&mut lines, "Code Patterns", &persona.code_patterns);
    push_bullet_section(
        &mut lines,
        "Requirements Patterns",
        &persona.requirements_patterns,
    );

    if !persona.domain_contexts.is_empty() {
        lines.push(String::new());
        lines.push("## Domain Context".into());
        for context in &persona.domain_contexts {
            lines.push(String::new());
            lines.push(format!("### {}", context.name));
            if !context.notes.is_empty() {
                lines.push(String::new());
                lines.extend(context.notes.iter().map(|note| format_bullet(note)));
            }
        }
    }

    push_bullet_section(&mut lines, "Review Checklist", &persona.review_checklist);

    lines.push(String::new());
    lines.join("\n")
}

/// File-per-record store for personas, keyed by name slug.
#[derive(Debug, Clone)]
pub struct PersonaStore {
    dir: PathBuf,
}

impl PersonaStore {
    /// Create a store rooted at the given paths
    pub fn new(paths: &TotemPaths) -> Self {
        Self {
            dir: paths.personas_dir(),
        }
    }

    /// All parseable personas, sorted by name.
    ///
    /// Files that fail to parse are logged and skipped; a missing
    /// directory lists as empty.
    pub fn list(&self) -> AppResult<Vec<Persona>> {
        let mut personas = Vec::new();

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(personas),
            Err(e) => return Err(AppError::Io(e)),
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
                continue;
            }
            let text = fs::read_to_string(&path)?;
            match parse_persona(&text) {
                Ok(persona) => personas.push(persona),
                Err(e) => {
                    tracing::warn!("skipping unparseable persona {}: {}", path.display(), e);
                }
            }
        }

        personas.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(personas)
    }

    /// The persona stored under this name or slug.
    ///
    /// Unlike listing, a parse failure here propagates: the caller asked
    /// for this specific record.
    pub fn get(&self, name: &str) -> AppResult<Persona> {
        let path = self.record_path(name)?;
        if !path.is_file() {
            return Err(AppError::not_found(format!(
                "persona '{}' does not exist",
                name
            )));
        }
        parse_persona(&fs::read_to_string(&path)?)
    }

    /// Write a new persona file.
    ///
    /// The name becomes the `# Name` title line, so names with line breaks
    /// are rejected.
    pub fn create(&self, persona: &Persona) -> AppResult<Persona> {
        if has_line_break(&persona.name) {
            return Err(AppError::bad_request(
                "persona name must not contain line breaks",
            ));
        }
        let path = self.record_path(&persona.name)?;
        ensure_dir(&self.dir)?;
        if path.exists() {
            return Err(AppError::conflict(format!(
                "persona '{}' already exists",
                persona.name
            )));
        }
        fs::write(&path, serialize_persona(persona))?;

        tracing::debug!("created persona '{}'", persona.name);
        Ok(persona.clone())
    }

    /// Rewrite an existing persona file.
    ///
    /// The slug stays the file's identity even when the display name
    /// inside the record changes.
    pub fn update(&self, name: &str, persona: &Persona) -> AppResult<Persona> {
        if has_line_break(&persona.name) {
            return Err(AppError::bad_request(
                "persona name must not contain line breaks",
            ));
        }
        let path = self.record_path(name)?;
        if !path.is_file() {
            return Err(AppError::not_found(format!(
                "persona '{}' does not exist",
                name
            )));
        }
        fs::write(&path, serialize_persona(persona))?;

        tracing::debug!("updated persona '{}'", name);
        Ok(persona.clone())
    }

    /// Remove a persona's backing file
    pub fn delete(&self, name: &str) -> AppResult<()> {
        let path = self.record_path(name)?;
        if !path.is_file() {
            return Err(AppError::not_found(format!(
                "persona '{}' does not exist",
                name
            )));
        }
        fs::remove_file(&path)?;

        tracing::debug!("deleted persona '{}'", name);
        Ok(())
    }

    /// Backing file for a name or pre-slugged key
    fn record_path(&self, name: &str) -> AppResult<PathBuf> {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(AppError::bad_request("persona name must not be empty"));
        }
        Ok(self.dir.join(format!("{}.md", slug)))
    }
}
