//! Ticket Models
//!
//! A ticket is one unit of work, backed 1:1 by a markdown file under
//! `.totem/tickets/`. The structured head block, title, description and
//! trailing sections are mapped by `services::tickets::parser`.

use serde::{Deserialize, Serialize};

/// One checklist line of a ticket's acceptance criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptanceCriterion {
    /// What must hold for the ticket to be done
    pub criteria: String,
    /// Whether the box is ticked
    #[serde(default)]
    pub complete: bool,
}

impl AcceptanceCriterion {
    /// Create an unchecked criterion
    pub fn new(criteria: impl Into<String>) -> Self {
        Self {
            criteria: criteria.into(),
            complete: false,
        }
    }
}

/// A work ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Ticket identifier, e.g. `TOT-42`; the backing file name is its slug
    pub id: String,
    /// Status key from the status convention
    pub status: String,
    /// Priority key from the priority convention
    pub priority: String,
    /// Complexity key from the complexity convention
    pub complexity: String,
    /// Persona assigned to the work, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
    /// Human collaborator, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaborator: Option<String>,
    /// Model expected to execute the work, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Estimated effort in days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_days: Option<f32>,
    /// Ids of tickets this one blocks
    #[serde(default)]
    pub blocks: Vec<String>,
    /// Ids of tickets blocking this one
    #[serde(default)]
    pub blocked_by: Vec<String>,
    /// Ticket title (the `# ` heading)
    pub title: String,
    /// First paragraph after the title
    #[serde(default)]
    pub description: String,
    /// `## Acceptance Criteria` checklist
    #[serde(default)]
    pub acceptance_criteria: Vec<AcceptanceCriterion>,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Known risks
    #[serde(default)]
    pub risks: Vec<String>,
    /// Implementation-note resources (files, docs, links)
    #[serde(default)]
    pub resources: Vec<String>,
}

impl Ticket {
    /// Create a ticket with the seeded default classifications
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: "open".to_string(),
            priority: "medium".to_string(),
            complexity: "medium".to_string(),
            persona: None,
            collaborator: None,
            model: None,
            effort_days: None,
            blocks: Vec::new(),
            blocked_by: Vec::new(),
            title: title.into(),
            description: String::new(),
            acceptance_criteria: Vec::new(),
            tags: Vec::new(),
            risks: Vec::new(),
            resources: Vec::new(),
        }
    }
}
