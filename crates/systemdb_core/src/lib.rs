//! Core domain logic for the systemdb trade catalog.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod search;
pub mod storage;
pub mod store;
pub mod validate;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::system::{Item, System};
pub use search::{matching_systems, MarketSide};
pub use storage::{MemoryStorage, SqliteStorage, StorageBackend, StorageError, StorageResult};
pub use store::{
    CatalogStore, ImportError, RuleViolation, StoreError, StoreResult, EXPORT_FILE_NAME,
    STORAGE_KEY,
};
pub use validate::verify_catalog;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
