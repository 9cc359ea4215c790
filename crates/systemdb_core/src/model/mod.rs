//! Domain model for the trade catalog.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//! - Keep one wire-exact shape shared by storage, import and export.
//!
//! # Invariants
//! - A `System` is identified by its `name`, unique across the catalog.
//! - Business rules are enforced at creation time by the store, not here.

pub mod system;
