//! Contributor Models
//!
//! A contributor is a human collaborator: git identity, role, availability
//! and working preferences. Backed by one markdown file under
//! `.totem/contributors/`, named by the slug of the contributor name.

use serde::{Deserialize, Serialize};

/// Git identity block of a contributor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitProfile {
    /// Account name on the hosting platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Commit email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Hosting platform, e.g. `github`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl GitProfile {
    /// Whether no field is set
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.platform.is_none()
    }
}

/// A contributor record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    /// Display name (the `# ` heading); the file name is its slug
    pub name: String,
    /// First paragraph after the title
    #[serde(default)]
    pub description: String,
    /// `## Git Profile` label pairs
    #[serde(default)]
    pub git_profile: GitProfile,
    /// `**Role**:` label inside `## Role & Responsibilities`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Responsibility bullets inside `## Role & Responsibilities`
    #[serde(default)]
    pub responsibilities: Vec<String>,
    /// `**Timezone**:` label inside `## Timezone & Availability`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// `**Availability**:` label inside `## Timezone & Availability`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    /// `## Coding Preferences` bullets
    #[serde(default)]
    pub coding_preferences: Vec<String>,
    /// `## Code Style` bullets
    #[serde(default)]
    pub code_style: Vec<String>,
    /// `## Development Workflow` bullets
    #[serde(default)]
    pub development_workflow: Vec<String>,
    /// `## Communication Style` bullets
    #[serde(default)]
    pub communication_style: Vec<String>,
    /// `## Expertise Areas` bullets
    #[serde(default)]
    pub expertise_areas: Vec<String>,
    /// `## Fun Facts` bullets
    #[serde(default)]
    pub fun_facts: Vec<String>,
    /// `## Contact Preferences` bullets
    #[serde(default)]
    pub contact_preferences: Vec<String>,
}

impl Contributor {
    /// Create an empty contributor
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            git_profile: GitProfile::default(),
            role: None,
            responsibilities: Vec::new(),
            timezone: None,
            availability: None,
            coding_preferences: Vec::new(),
            code_style: Vec::new(),
            development_workflow: Vec::new(),
            communication_style: Vec::new(),
            expertise_areas: Vec::new(),
            fun_facts: Vec::new(),
            contact_preferences: Vec::new(),
        }
    }
}
