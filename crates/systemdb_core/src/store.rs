//! Canonical catalog store with durable mirroring.
//!
//! # Responsibility
//! - Own the in-memory catalog list as the single source of truth.
//! - Keep the durable `"systems"` slot synchronized on every mutation.
//! - Enforce creation-time business rules before accepting a system.
//!
//! # Invariants
//! - The durable slot always holds the serialization of the full list.
//! - Any failed operation leaves both the list and the slot untouched.
//! - Log events are metadata-only; catalog content never reaches the log.

use crate::model::system::{Item, System};
use crate::storage::{StorageBackend, StorageError};
use crate::validate::verify_catalog;
use log::{error, info};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed durable-storage key for the catalog document.
pub const STORAGE_KEY: &str = "systems";

/// Conventional file name for exported catalog documents.
pub const EXPORT_FILE_NAME: &str = "NoMansSkySystemDB.json";

pub type StoreResult<T> = Result<T, StoreError>;

/// Creation-time business rule violated by an appended system.
///
/// `Display` yields the exact reason string surfaced to the user; variants
/// are ordered the way the rules are checked, and the first violation wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleViolation {
    MissingName,
    DuplicateName,
    NoItems,
    IncompleteItem,
    DuplicateItem,
}

impl RuleViolation {
    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingName => "missing_name",
            Self::DuplicateName => "duplicate_name",
            Self::NoItems => "no_items",
            Self::IncompleteItem => "incomplete_item",
            Self::DuplicateItem => "duplicate_item",
        }
    }
}

impl Display for RuleViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::MissingName => "The system must have a name.",
            Self::DuplicateName => "System name is not unique.",
            Self::NoItems => "No items have been added to system.",
            Self::IncompleteItem => "All items must have a name, price and percent.",
            Self::DuplicateItem => "All item name in a system must be unique.",
        };
        write!(f, "{reason}")
    }
}

impl Error for RuleViolation {}

/// Store-level error for catalog mutations and persistence.
#[derive(Debug)]
pub enum StoreError {
    Rule(RuleViolation),
    Storage(StorageError),
    /// The durable slot held text that does not decode as a catalog.
    Corrupt(serde_json::Error),
    /// The in-memory list failed to serialize.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rule(violation) => write!(f, "{violation}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Corrupt(err) => write!(f, "stored catalog is not a valid document: {err}"),
            Self::Encode(err) => write!(f, "catalog could not be serialized: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rule(violation) => Some(violation),
            Self::Storage(err) => Some(err),
            Self::Corrupt(err) | Self::Encode(err) => Some(err),
        }
    }
}

impl From<RuleViolation> for StoreError {
    fn from(value: RuleViolation) -> Self {
        Self::Rule(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Outcome taxonomy for [`CatalogStore::import_merge`].
///
/// `Shape` deliberately carries no structural detail; the validator is a
/// bare predicate and callers own user-facing messaging.
#[derive(Debug)]
pub enum ImportError {
    /// The raw text is not JSON.
    Parse(serde_json::Error),
    /// The decoded document does not match the catalog shape.
    Shape,
    /// The merged list could not be persisted.
    Persist(StoreError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "catalog document is not valid JSON: {err}"),
            Self::Shape => write!(f, "catalog document does not match the expected shape"),
            Self::Persist(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Shape => None,
            Self::Persist(err) => Some(err),
        }
    }
}

/// Stateful owner of the canonical catalog and its durable mirror.
///
/// Exactly one logical writer touches the store at a time; every operation
/// runs to completion before control returns.
#[derive(Debug)]
pub struct CatalogStore<S: StorageBackend> {
    storage: S,
    systems: Vec<System>,
}

impl<S: StorageBackend> CatalogStore<S> {
    /// Loads the catalog from the durable slot.
    ///
    /// An absent slot yields an empty catalog. A slot that fails to decode
    /// is rejected with [`StoreError::Corrupt`] instead of being silently
    /// replaced; recovery is an explicit user decision.
    pub fn load(storage: S) -> StoreResult<Self> {
        let systems = match storage.get(STORAGE_KEY)? {
            Some(raw) => serde_json::from_str::<Vec<System>>(&raw).map_err(|err| {
                error!("event=catalog_load module=store status=error error_code=catalog_corrupt");
                StoreError::Corrupt(err)
            })?,
            None => Vec::new(),
        };

        info!(
            "event=catalog_load module=store status=ok count={}",
            systems.len()
        );
        Ok(Self { storage, systems })
    }

    /// Read-only snapshot of the catalog.
    pub fn systems(&self) -> &[System] {
        &self.systems
    }

    /// Appends one system after business-rule validation.
    ///
    /// # Contract
    /// - Rules are checked in fixed order; the first violation wins and is
    ///   returned as [`StoreError::Rule`] with its user-facing reason.
    /// - On success the full list is re-serialized to the durable slot.
    /// - On any failure the catalog is unchanged.
    pub fn append(&mut self, system: System) -> StoreResult<()> {
        if let Err(violation) = self.check_rules(&system) {
            info!(
                "event=catalog_append module=store status=rejected reason_code={}",
                violation.code()
            );
            return Err(violation.into());
        }

        let mut next = self.systems.clone();
        next.push(system);
        self.persist(&next)?;
        self.systems = next;

        info!(
            "event=catalog_append module=store status=ok total={}",
            self.systems.len()
        );
        Ok(())
    }

    /// Removes every system with the given name.
    ///
    /// Idempotent: an absent name removes nothing and is not an error.
    /// Returns the number of systems removed.
    pub fn remove(&mut self, name: &str) -> StoreResult<usize> {
        let next: Vec<System> = self
            .systems
            .iter()
            .filter(|system| system.name != name)
            .cloned()
            .collect();
        let removed = self.systems.len() - next.len();

        if removed > 0 {
            self.persist(&next)?;
            self.systems = next;
        }

        info!(
            "event=catalog_remove module=store status=ok removed={removed} total={}",
            self.systems.len()
        );
        Ok(removed)
    }

    /// Merges an imported catalog document into the store.
    ///
    /// # Contract
    /// - Raw text that is not JSON reports [`ImportError::Parse`].
    /// - A decoded document rejected by the shape validator reports
    ///   [`ImportError::Shape`]; so does a post-acceptance typed-decode
    ///   mismatch on scalar fields.
    /// - Accepted systems are appended wholesale, with no deduplication
    ///   against existing names.
    ///
    /// Returns the number of systems added.
    pub fn import_merge(&mut self, raw: &str) -> Result<usize, ImportError> {
        let value: Value = serde_json::from_str(raw).map_err(|err| {
            error!("event=catalog_import module=store status=error error_code=parse_failed");
            ImportError::Parse(err)
        })?;

        if !verify_catalog(&value) {
            error!("event=catalog_import module=store status=error error_code=shape_rejected");
            return Err(ImportError::Shape);
        }

        let entries = match value {
            Value::Array(entries) => entries,
            Value::Object(mut map) => match map.remove("systems") {
                Some(Value::Array(entries)) => entries,
                _ => return Err(ImportError::Shape),
            },
            _ => return Err(ImportError::Shape),
        };

        let mut imported = Vec::with_capacity(entries.len());
        for entry in entries {
            let system: System = serde_json::from_value(entry).map_err(|_| {
                error!("event=catalog_import module=store status=error error_code=shape_rejected");
                ImportError::Shape
            })?;
            imported.push(system);
        }

        let added = imported.len();
        let mut next = self.systems.clone();
        next.extend(imported);
        self.persist(&next).map_err(ImportError::Persist)?;
        self.systems = next;

        info!(
            "event=catalog_import module=store status=ok added={added} total={}",
            self.systems.len()
        );
        Ok(added)
    }

    /// Serializes the current catalog for writing to an export file.
    ///
    /// Equivalent to the durable slot contents after the last mutation.
    pub fn export(&self) -> StoreResult<String> {
        serde_json::to_string(&self.systems).map_err(StoreError::Encode)
    }

    /// Empties the catalog and deletes the durable slot.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.storage.remove(STORAGE_KEY)?;
        self.systems.clear();
        info!("event=catalog_clear module=store status=ok");
        Ok(())
    }

    fn check_rules(&self, system: &System) -> Result<(), RuleViolation> {
        if system.name.is_empty() {
            return Err(RuleViolation::MissingName);
        }
        if self.systems.iter().any(|s| s.name == system.name) {
            return Err(RuleViolation::DuplicateName);
        }
        if system.buy.is_empty() && system.sell.is_empty() {
            return Err(RuleViolation::NoItems);
        }
        if system
            .buy
            .iter()
            .chain(system.sell.iter())
            .any(|item| !item.is_complete())
        {
            return Err(RuleViolation::IncompleteItem);
        }
        // Distinctness is judged over the whole item value, not the name
        // alone. See DESIGN.md for the inherited-behavior decision.
        if has_duplicate_item(&system.buy) || has_duplicate_item(&system.sell) {
            return Err(RuleViolation::DuplicateItem);
        }
        Ok(())
    }

    fn persist(&mut self, next: &[System]) -> StoreResult<()> {
        let encoded = serde_json::to_string(next).map_err(StoreError::Encode)?;
        self.storage.set(STORAGE_KEY, &encoded)?;
        Ok(())
    }
}

fn has_duplicate_item(items: &[Item]) -> bool {
    items
        .iter()
        .enumerate()
        .any(|(index, item)| items[..index].contains(item))
}
