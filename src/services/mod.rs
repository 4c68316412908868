//! Store layer: one typed store per record family, all built on the
//! markdown primitives.

pub mod contributors;
pub mod conventions;
pub mod personas;
pub mod tickets;

pub use contributors::ContributorStore;
pub use conventions::{ConventionStore, PrefixStore};
pub use personas::PersonaStore;
pub use tickets::TicketStore;
