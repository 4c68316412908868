//! Convention Models
//!
//! Key/description vocabularies (status, priority, complexity, layer,
//! component, feature) used to classify tickets, stored as bullet sections
//! in markdown files.

use serde::{Deserialize, Serialize};

/// A single key/description pair within a convention section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConventionEntry {
    /// Unique within its section (case-insensitive); original casing is the
    /// canonical stored form
    pub key: String,
    /// Free-form description shown next to the key
    pub description: String,
}

impl ConventionEntry {
    /// Create a new entry
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
        }
    }

    /// Case-insensitive key comparison used wherever keys are matched
    pub fn key_matches(&self, key: &str) -> bool {
        self.key.eq_ignore_ascii_case(key)
    }
}

/// Update payload for a convention entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryUpdate {
    /// Replacement description
    pub description: String,
    /// Optional replacement key (rename)
    #[serde(default)]
    pub new_key: Option<String>,
}

impl EntryUpdate {
    /// Create an update that only replaces the description
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            new_key: None,
        }
    }

    /// Create an update that renames the entry as well
    pub fn rename(description: impl Into<String>, new_key: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            new_key: Some(new_key.into()),
        }
    }
}

/// The six keyed convention vocabularies.
///
/// Status, priority and complexity each own a file that is fully regenerated
/// on every write; layer, component and feature are sections of the shared
/// `id.md` and are spliced in place. The prefix scalar is handled separately
/// by `PrefixStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConventionKind {
    Status,
    Priority,
    Complexity,
    Layer,
    Component,
    Feature,
}

impl ConventionKind {
    /// Lowercase name used in file names, messages and routes
    pub fn as_str(&self) -> &'static str {
        match self {
            ConventionKind::Status => "status",
            ConventionKind::Priority => "priority",
            ConventionKind::Complexity => "complexity",
            ConventionKind::Layer => "layer",
            ConventionKind::Component => "component",
            ConventionKind::Feature => "feature",
        }
    }

    /// Backing file name under the conventions directory
    pub fn file_name(&self) -> &'static str {
        match self {
            ConventionKind::Status => "status.md",
            ConventionKind::Priority => "priority.md",
            ConventionKind::Complexity => "complexity.md",
            ConventionKind::Layer | ConventionKind::Component | ConventionKind::Feature => "id.md",
        }
    }

    /// The `## ` heading this kind lives under, for the kinds that share
    /// `id.md`. `None` means the kind owns its whole file.
    pub fn section_name(&self) -> Option<&'static str> {
        match self {
            ConventionKind::Layer => Some("Layer"),
            ConventionKind::Component => Some("Component"),
            ConventionKind::Feature => Some("Feature"),
            _ => None,
        }
    }

    /// Whether writes regenerate the whole file from header + entries
    pub fn is_regenerated(&self) -> bool {
        self.section_name().is_none()
    }

    /// Intro sentence written under the title when the file or section is
    /// first seeded. Regenerated kinds also rewrite it on every save.
    pub fn file_intro(&self) -> &'static str {
        match self {
            ConventionKind::Status => "Statuses a ticket can be in.",
            ConventionKind::Priority => "Priorities used to order work.",
            ConventionKind::Complexity => "Complexity levels used to size work.",
            ConventionKind::Layer => "Architectural layers a ticket can target.",
            ConventionKind::Component => "Components of the system.",
            ConventionKind::Feature => "Feature areas tickets are grouped by.",
        }
    }
}

impl std::fmt::Display for ConventionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
