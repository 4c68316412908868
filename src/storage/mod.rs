//! Path configuration and project bootstrap.

pub mod bootstrap;
pub mod paths;

pub use bootstrap::init_project;
pub use paths::TotemPaths;
