//! Totem Core - Markdown Record Store
//!
//! This library is the storage core of Totem, a git-native project
//! management tool that keeps every record as a hand-editable markdown
//! file under a `.totem/` tree. It includes:
//! - Markdown primitives (line buffer, section locator, entry parser)
//! - Convention stores (status, priority, complexity, layer, component,
//!   feature, prefix)
//! - Rich record stores (tickets, personas, contributors)
//! - Path configuration and project bootstrap
//!
//! HTTP framing and the frontend are external callers; errors carry an
//! [`AppError::http_status`] hint for that boundary.

pub mod markdown;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export the store API surface
pub use services::{
    contributors::{parse_contributor, serialize_contributor},
    personas::{parse_persona, serialize_persona},
    tickets::{parse_ticket, serialize_ticket},
    ContributorStore, ConventionStore, PersonaStore, PrefixStore, TicketStore,
};

pub use models::{
    AcceptanceCriterion, Contributor, ConventionEntry, ConventionKind, DomainContext, EntryUpdate,
    GitProfile, Persona, Ticket,
};
pub use storage::{init_project, TotemPaths};
pub use utils::error::{AppError, AppResult};
