//! Persona Models
//!
//! A persona describes how an (often automated) collaborator approaches
//! work: its decision framework, code patterns, domain knowledge and review
//! checklist. Backed by one markdown file under `.totem/personas/`, named
//! by the slug of the persona name.

use serde::{Deserialize, Serialize};

/// A named block of domain knowledge inside a persona's `Domain Context`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainContext {
    /// Sub-heading name (arbitrary)
    pub name: String,
    /// Bullet notes under the sub-heading
    #[serde(default)]
    pub notes: Vec<String>,
}

impl DomainContext {
    /// Create an empty context block
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            notes: Vec::new(),
        }
    }
}

/// A persona record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    /// Display name (the `# ` heading); the file name is its slug
    pub name: String,
    /// First paragraph after the title
    #[serde(default)]
    pub description: String,
    /// How the persona weighs decisions
    #[serde(default)]
    pub decision_framework: Vec<String>,
    /// Code patterns the persona follows
    #[serde(default)]
    pub code_patterns: Vec<String>,
    /// How the persona reads and writes requirements
    #[serde(default)]
    pub requirements_patterns: Vec<String>,
    /// Named `###` sub-sections of `## Domain Context`
    #[serde(default)]
    pub domain_contexts: Vec<DomainContext>,
    /// Items checked during review
    #[serde(default)]
    pub review_checklist: Vec<String>,
}

impl Persona {
    /// Create an empty persona
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            decision_framework: Vec::new(),
            code_patterns: Vec::new(),
            requirements_patterns: Vec::new(),
            domain_contexts: Vec::new(),
            review_checklist: Vec::new(),
        }
    }
}
