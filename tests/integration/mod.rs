//! Integration Tests Module
//!
//! End-to-end tests over a real temporary `.totem` tree. Tests cover the
//! convention stores and their two rewrite disciplines, the prefix scalar,
//! and the file-per-record ticket, persona and contributor stores.

// Convention store and prefix tests
mod conventions_test;

// Persona and contributor store tests
mod profiles_test;

// Ticket parser and store tests
mod tickets_test;
