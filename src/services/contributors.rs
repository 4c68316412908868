//! Contributor Store
//!
//! One markdown file per contributor under `.totem/contributors/`, named
//! by the slug of the contributor name. Sections hold either `- **Label**:
//! value` pairs (git profile, role, timezone) or plain bullet lists
//! (preferences, expertise, and so on). Unknown headings and labels are
//! ignored on read.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::markdown::document::{has_line_break, Document};
use crate::markdown::entries::{
    collect_bullets, format_bullet, format_label, parse_bullet_item, parse_label_line,
    push_bullet_section,
};
use crate::markdown::section::{first_paragraph, split_sections};
use crate::models::Contributor;
use crate::storage::paths::{ensure_dir, TotemPaths};
use crate::utils::error::{AppError, AppResult};
use crate::utils::slug::slugify;

/// Parse a contributor markdown document. Only `# Name` is required.
pub fn parse_contributor(text: &str) -> AppResult<Contributor> {
    let doc = Document::parse(text);
    let blocks = split_sections(doc.lines());

    let title = blocks
        .first()
        .filter(|block| block.level == 1)
        .ok_or_else(|| AppError::parse("contributor has no '# Name' heading"))?;
    let mut contributor = Contributor::new(title.title.clone());
    contributor.description = first_paragraph(&doc.lines()[title.start..title.end]);

    for block in blocks.iter().skip(1).filter(|block| block.level == 2) {
        let body = &doc.lines()[block.start..block.end];
        match block.title.as_str() {
            "Git Profile" => {
                for (label, value) in label_pairs(body) {
                    match label.as_str() {
                        "Username" => contributor.git_profile.username = Some(value),
                        "Email" => contributor.git_profile.email = Some(value),
                        "Platform" => contributor.git_profile.platform = Some(value),
                        _ => {}
                    }
                }
            }
            "Role & Responsibilities" => {
                for line in body {
                    if let Some((label, value)) = parse_label_line(line) {
                        if label == "Role" {
                            contributor.role = Some(value);
                        }
                    } else if let Some(item) = parse_bullet_item(line) {
                        contributor.responsibilities.push(item);
                    }
                }
            }
            "Timezone & Availability" => {
                for (label, value) in label_pairs(body) {
                    match label.as_str() {
                        "Timezone" => contributor.timezone = Some(value),
                        "Availability" => contributor.availability = Some(value),
                        _ => {}
                    }
                }
            }
            "Coding Preferences" => contributor.coding_preferences = collect_bullets(body),
            "Code Style" => contributor.code_style = collect_bullets(body),
            "Development Workflow" => contributor.development_workflow = collect_bullets(body),
            "Communication Style" => contributor.communication_style = collect_bullets(body),
            "Expertise Areas" => contributor.expertise_areas = collect_bullets(body),
            "Fun Facts" => contributor.fun_facts = collect_bullets(body),
            "Contact Preferences" => contributor.contact_preferences = collect_bullets(body),
            _ => {}
        }
    }

    Ok(contributor)
}

/// Render a contributor in canonical shape, omitting empty sections
pub fn serialize_contributor(contributor: &Contributor) -> String {
    let mut lines: Vec<String> = vec![format!("# {}", contributor.name)];

    if !contributor.description.is_empty() {
        lines.push(String::new());
        lines.push(contributor.description.clone());
    }

    if !contributor.git_profile.is_empty() {
        lines.push(String::new());
        lines.push("## Git Profile".into());
        lines.push(String::new());
        if let Some(username) = &contributor.git_profile.username {
            lines.push(format_label("Username", username));
        }
        if let Some(email) = &contributor.git_profile.email {
            lines.push(format_label("Email", email));
        }
        if let Some(platform) = &contributor.git_profile.platform {
            lines.push(format_label("Platform", platform));
        }
    }

    if contributor.role.is_some() || !contributor.responsibilities.is_empty() {
        lines.push(String::new());
        lines.push("## Role & Responsibilities".into());
        lines.push(String::new());
        if let Some(role) = &contributor.role {
            lines.push(format_label("Role", role));
        }
        lines.extend(contributor.responsibilities.iter().map(|r| format_bullet(r)));
    }

    if contributor.timezone.is_some() || contributor.availability.is_some() {
        lines.push(String::new());
        lines.push("## Timezone & Availability".into());
        lines.push(String::new());
        if let Some(timezone) = &contributor.timezone {
            lines.push(format_label("Timezone", timezone));
        }
        if let Some(availability) = &contributor.availability {
            lines.push(format_label("Availability", availability));
        }
    }

    push_bullet_section(&mut lines, "Coding Preferences", &contributor.coding_preferences);
    push_bullet_section(&mut lines, "Code Style", &contributor.code_style);
    push_bullet_section(
        &mut lines,
        "Development Workflow",
        &contributor.development_workflow,
    );
    push_bullet_section(
        &mut lines,
        "Communication Style",
        &contributor.communication_style,
    );
    push_bullet_section(&mut lines, "Expertise Areas", &contributor.expertise_areas);
    push_bullet_section(&mut lines, "Fun Facts", &contributor.fun_facts);
    push_bullet_section(
        &mut lines,
        "Contact Preferences",
        &contributor.contact_preferences,
    );

    lines.push(String::new());
    lines.join("\n")
}

/// Every `**Label**: value` pair in a section body
fn label_pairs(lines: &[String]) -> Vec<(String, String)> {
    lines.iter().filter_map(|line| parse_label_line(line)).collect()
}

/// File-per-record store for contributors, keyed by name slug.
#[derive(Debug, Clone)]
pub struct ContributorStore {
    dir: PathBuf,
}

impl ContributorStore {
    /// Create a store rooted at the given paths
    pub fn new(paths: &TotemPaths) -> Self {
        Self {
            dir: paths.contributors_dir(),
        }
    }

    /// All parseable contributors, sorted by name.
    ///
    /// Files that fail to parse are logged and skipped; a missing
    /// directory lists as empty.
    pub fn list(&self) -> AppResult<Vec<Contributor>> {
        let mut contributors = Vec::new();

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(contributors),
            Err(e) => return Err(AppError::Io(e)),
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
                continue;
            }
            let text = fs::read_to_string(&path)?;
            match parse_contributor(&text) {
                Ok(contributor) => contributors.push(contributor),
                Err(e) => {
                    tracing::warn!("skipping unparseable contributor {}: {}", path.display(), e);
                }
            }
        }

        contributors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(contributors)
    }

    /// The contributor stored under this name or slug
    pub fn get(&self, name: &str) -> AppResult<Contributor> {
        let path = self.record_path(name)?;
        if !path.is_file() {
            return Err(AppError::not_found(format!(
                "contributor '{}' does not exist",
                name
            )));
        }
        parse_contributor(&fs::read_to_string(&path)?)
    }

    /// Write a new contributor file.
    ///
    /// The name becomes the `# Name` title line, so names with line breaks
    /// are rejected.
    pub fn create(&self, contributor: &Contributor) -> AppResult<Contributor> {
        if has_line_break(&contributor.name) {
            return Err(AppError::bad_request(
                "contributor name must not contain line breaks",
            ));
        }
        let path = self.record_path(&contributor.name)?;
        ensure_dir(&self.dir)?;
        if path.exists() {
            return Err(AppError::conflict(format!(
                "contributor '{}' already exists",
                contributor.name
            )));
        }
        fs::write(&path, serialize_contributor(contributor))?;

        tracing::debug!("created contributor '{}'", contributor.name);
        Ok(contributor.clone())
    }

    /// Rewrite an existing contributor file; the slug stays its identity
    pub fn update(&self, name: &str, contributor: &Contributor) -> AppResult<Contributor> {
        if has_line_break(&contributor.name) {
            return Err(AppError::bad_request(
                "contributor name must not contain line breaks",
            ));
        }
        let path = self.record_path(name)?;
        if !path.is_file() {
            return Err(AppError::not_found(format!(
                "contributor '{}' does not exist",
                name
            )));
        }
        fs::write(&path, serialize_contributor(contributor))?;

        tracing::debug!("updated contributor '{}'", name);
        Ok(contributor.clone())
    }

    /// Remove a contributor's backing file
    pub fn delete(&self, name: &str) -> AppResult<()> {
        let path = self.record_path(name)?;
        if !path.is_file() {
            return Err(AppError::not_found(format!(
                "contributor '{}' does not exist",
                name
            )));
        }
        fs::remove_file(&path)?;

        tracing::debug!("deleted contributor '{}'", name);
        Ok(())
    }

    /// Backing file for a name or pre-slugged key
    fn record_path(&self, name: &str) -> AppResult<PathBuf> {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(AppError::bad_request("contributor name must not be empty"));
        }
        Ok(self.dir.join(format!("{}.md", slug)))
    }
}
