//! Ticket Markdown Parser/Serializer
//!
//! A ticket file is a fenced metadata block, a `# Title`, a description
//! paragraph, and then optional sections: an `## Acceptance Criteria`
//! checklist, a fenced notes block of `//` resource lines, a `**Risks:**`
//! line and a `**Tags:**` line. Parsing is tolerant of prose it does not
//! recognize; serialization always emits the canonical shape.

use crate::markdown::document::trim_eol;
use crate::models::{AcceptanceCriterion, Ticket};
use crate::utils::error::{AppError, AppResult};

/// Parse a ticket markdown document.
///
/// The metadata block and its `id`, `status`, `priority` and `complexity`
/// keys are required, as is the `# Title` heading. Everything else is
/// optional; unknown metadata keys and unrecognized prose are ignored.
pub fn parse_ticket(text: &str) -> AppResult<Ticket> {
    let lines: Vec<&str> = text.split('\n').map(trim_eol).collect();
    let mut index = 0;

    let meta = parse_metadata_block(&lines, &mut index)?;
    let mut ticket = Ticket::new(meta.require("id")?, "");
    ticket.status = meta.require("status")?;
    ticket.priority = meta.require("priority")?;
    ticket.complexity = meta.require("complexity")?;
    ticket.persona = meta.get("persona");
    ticket.collaborator = meta.get("collaborator");
    ticket.model = meta.get("model");
    ticket.effort_days = match meta.get("effort_days") {
        Some(raw) => Some(raw.parse::<f32>().map_err(|_| {
            AppError::parse(format!("effort_days is not a number: '{}'", raw))
        })?),
        None => None,
    };
    ticket.blocks = meta.get("blocks").map(parse_id_list).unwrap_or_default();
    ticket.blocked_by = meta.get("blocked_by").map(parse_id_list).unwrap_or_default();

    skip_blanks(&lines, &mut index);
    ticket.title = match lines.get(index).and_then(|line| line.strip_prefix("# ")) {
        Some(title) => {
            index += 1;
            title.trim().to_string()
        }
        None => return Err(AppError::parse("ticket has no '# Title' heading")),
    };

    ticket.description = parse_description(&lines, &mut index);

    while index < lines.len() {
        let line = lines[index].trim();
        if line == "## Acceptance Criteria" {
            index += 1;
            ticket.acceptance_criteria = parse_checklist(&lines, &mut index);
        } else if line.starts_with("```") {
            index += 1;
            ticket.resources = parse_notes_block(&lines, &mut index);
        } else if let Some(rest) = line.strip_prefix("**Risks:**") {
            ticket.risks = split_risks(rest);
            index += 1;
        } else if let Some(rest) = line.strip_prefix("**Tags:**") {
            ticket.tags = rest
                .split(',')
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect();
            index += 1;
        } else {
            index += 1;
        }
    }

    Ok(ticket)
}

/// Render a ticket in canonical shape: metadata block with stable key
/// order, title, description, then only the sections that have content.
pub fn serialize_ticket(ticket: &Ticket) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("```yaml".into());
    lines.push(format!("id: {}", ticket.id));
    lines.push(format!("status: {}", ticket.status));
    lines.push(format!("priority: {}", ticket.priority));
    lines.push(format!("complexity: {}", ticket.complexity));
    if let Some(persona) = &ticket.persona {
        lines.push(format!("persona: {}", persona));
    }
    if let Some(collaborator) = &ticket.collaborator {
        lines.push(format!("collaborator: {}", collaborator));
    }
    if let Some(model) = &ticket.model {
        lines.push(format!("model: {}", model));
    }
    if let Some(effort) = ticket.effort_days {
        lines.push(format!("effort_days: {}", effort));
    }
    if !ticket.blocks.is_empty() {
        lines.push(format!("blocks: {}", ticket.blocks.join(", ")));
    }
    if !ticket.blocked_by.is_empty() {
        lines.push(format!("blocked_by: {}", ticket.blocked_by.join(", ")));
    }
    lines.push("```".into());

    lines.push(String::new());
    lines.push(format!("# {}", ticket.title));

    if !ticket.description.is_empty() {
        lines.push(String::new());
        lines.push(ticket.description.clone());
    }

    if !ticket.acceptance_criteria.is_empty() {
        lines.push(String::new());
        lines.push("## Acceptance Criteria".into());
        lines.push(String::new());
        for criterion in &ticket.acceptance_criteria {
            let marker = if criterion.complete { "x" } else { " " };
            lines.push(format!("- [{}] {}", marker, criterion.criteria));
        }
    }

    if !ticket.resources.is_empty() {
        lines.push(String::new());
        lines.push("```notes".into());
        for resource in &ticket.resources {
            lines.push(format!("// {}", resource));
        }
        lines.push("```".into());
    }

    if !ticket.risks.is_empty() {
        lines.push(String::new());
        lines.push(format!("**Risks:** {}", ticket.risks.join(", ")));
    }

    if !ticket.tags.is_empty() {
        lines.push(String::new());
        lines.push(format!("**Tags:** {}", ticket.tags.join(", ")));
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Raw key/value pairs from the top metadata block
struct MetadataBlock {
    pairs: Vec<(String, String)>,
}

impl MetadataBlock {
    fn get(&self, key: &str) -> Option<String> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .filter(|v| !v.is_empty())
    }

    fn require(&self, key: &str) -> AppResult<String> {
        self.get(key)
            .ok_or_else(|| AppError::parse(format!("metadata block is missing '{}'", key)))
    }
}

/// Parse the required fenced metadata block at the top of the file.
///
/// The fence label may be `yaml`, `yml` or empty. Anything else before the
/// first non-blank line means the file is not a ticket.
fn parse_metadata_block(lines: &[&str], index: &mut usize) -> AppResult<MetadataBlock> {
    skip_blanks(lines, index);

    let opener = lines
        .get(*index)
        .and_then(|line| line.trim().strip_prefix("```"))
        .ok_or_else(|| AppError::parse("ticket must start with a fenced metadata block"))?;
    if !matches!(opener.trim(), "" | "yaml" | "yml") {
        return Err(AppError::parse(format!(
            "unexpected fence label '{}' on metadata block",
            opener.trim()
        )));
    }
    *index += 1;

    let mut pairs = Vec::new();
    loop {
        let Some(line) = lines.get(*index) else {
            return Err(AppError::parse("metadata block is not closed"));
        };
        if line.trim() == "```" {
            *index += 1;
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            pairs.push((key.trim().to_string(), value.trim().to_string()));
        }
        *index += 1;
    }

    Ok(MetadataBlock { pairs })
}

/// First block of non-blank text after the title, up to a blank line.
/// Empty when the next construct follows the title immediately.
fn parse_description(lines: &[&str], index: &mut usize) -> String {
    skip_blanks(lines, index);

    let mut description: Vec<&str> = Vec::new();
    while let Some(line) = lines.get(*index) {
        let trimmed = line.trim();
        if trimmed.is_empty()
            || trimmed.starts_with("## ")
            || trimmed.starts_with("```")
            || trimmed.starts_with("**Risks:**")
            || trimmed.starts_with("**Tags:**")
        {
            break;
        }
        description.push(trimmed);
        *index += 1;
    }
    description.join("\n")
}

/// Checklist lines after the acceptance heading, tolerating blank gaps
fn parse_checklist(lines: &[&str], index: &mut usize) -> Vec<AcceptanceCriterion> {
    let mut criteria = Vec::new();
    while let Some(line) = lines.get(*index) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            *index += 1;
            continue;
        }
        let Some(criterion) = parse_checklist_line(trimmed) else {
            break;
        };
        criteria.push(criterion);
        *index += 1;
    }
    criteria
}

/// One `- [ ]` / `- [x]` checklist line
fn parse_checklist_line(line: &str) -> Option<AcceptanceCriterion> {
    let (complete, rest) = if let Some(rest) = line.strip_prefix("- [ ]") {
        (false, rest)
    } else if let Some(rest) = line.strip_prefix("- [x]") {
        (true, rest)
    } else if let Some(rest) = line.strip_prefix("- [X]") {
        (true, rest)
    } else {
        return None;
    };
    Some(AcceptanceCriterion {
        criteria: rest.trim().to_string(),
        complete,
    })
}

/// `//` lines inside the notes fence, prefix stripped
fn parse_notes_block(lines: &[&str], index: &mut usize) -> Vec<String> {
    let mut resources = Vec::new();
    while let Some(line) = lines.get(*index) {
        if line.trim() == "```" {
            *index += 1;
            break;
        }
        if let Some(resource) = line.trim().strip_prefix("//") {
            let resource = resource.trim();
            if !resource.is_empty() {
                resources.push(resource.to_string());
            }
        }
        *index += 1;
    }
    resources
}

/// Comma-separated id list, with optional surrounding brackets
fn parse_id_list(value: String) -> Vec<String> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_prefix('[').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix(']').unwrap_or(trimmed);
    trimmed
        .split(',')
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect()
}

/// Split a risks line at commas followed by an uppercase letter.
///
/// A heuristic, not a grammar: commas inside a risk hold as long as the
/// next word is not capitalized. It can over- or under-split on unusual
/// content.
fn split_risks(text: &str) -> Vec<String> {
    let mut risks = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = text.chars().collect();
    let mut position = 0;

    while position < chars.len() {
        if chars[position] == ',' {
            let mut next = position + 1;
            while next < chars.len() && chars[next] == ' ' {
                next += 1;
            }
            if next < chars.len() && chars[next].is_uppercase() {
                let risk = current.trim();
                if !risk.is_empty() {
                    risks.push(risk.to_string());
                }
                current.clear();
                position = next;
                continue;
            }
        }
        current.push(chars[position]);
        position += 1;
    }

    let risk = current.trim();
    if !risk.is_empty() {
        risks.push(risk.to_string());
    }
    risks
}

/// Skip over blank lines
fn skip_blanks(lines: &[&str], index: &mut usize) {
    while lines.get(*index).map(|l| l.trim().is_empty()).unwrap_or(false) {
        *index += 1;
    }
}
