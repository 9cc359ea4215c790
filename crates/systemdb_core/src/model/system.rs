//! System and item records.
//!
//! # Responsibility
//! - Define the persisted catalog entry shape.
//! - Mirror the wire contract: exact key set on systems, tolerant items.
//!
//! # Invariants
//! - `System` serialization uses exactly the keys
//!   `name`, `glyphs`, `tags`, `buy`, `sell`.
//! - A zero `price` or `percent` on an `Item` means "unset", never a
//!   legitimate value.

use serde::{Deserialize, Serialize};

/// One tradeable resource inside a system's buy or sell list.
///
/// `percent` is a signed trend deviation; its direction reads differently
/// in buy and sell contexts, so it is stored raw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    /// Unit price. Zero is treated as unset.
    pub price: f64,
    /// Signed price trend in percent. Zero is treated as unset.
    pub percent: f64,
}

impl Item {
    pub fn new(name: impl Into<String>, price: f64, percent: f64) -> Self {
        Self {
            name: name.into(),
            price,
            percent,
        }
    }

    /// Returns whether all fields carry real values.
    ///
    /// Empty name and zero price/percent are form defaults, so any of them
    /// marks the item as incomplete.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && self.price != 0.0 && self.percent != 0.0
    }
}

/// Canonical catalog entry: a named system with its market lists.
///
/// The wire form rejects unknown keys so an imported document cannot smuggle
/// extra fields through a round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct System {
    /// Unique across the catalog. Uniqueness is checked on append.
    pub name: String,
    /// Free-form glyph address text.
    pub glyphs: String,
    pub tags: Vec<String>,
    /// Resources bought at this system.
    pub buy: Vec<Item>,
    /// Resources sold at this system.
    pub sell: Vec<Item>,
}

impl System {
    pub fn new(
        name: impl Into<String>,
        glyphs: impl Into<String>,
        tags: Vec<String>,
        buy: Vec<Item>,
        sell: Vec<Item>,
    ) -> Self {
        Self {
            name: name.into(),
            glyphs: glyphs.into(),
            tags,
            buy,
            sell,
        }
    }
}
