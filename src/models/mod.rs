//! Data Models
//!
//! Contains all record shapes stored in the markdown database.

pub mod contributor;
pub mod convention;
pub mod persona;
pub mod ticket;

pub use contributor::*;
pub use convention::*;
pub use persona::*;
pub use ticket::*;
