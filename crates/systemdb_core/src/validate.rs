//! Catalog document shape validation.
//!
//! # Responsibility
//! - Classify an arbitrary decoded JSON value as a well-formed catalog
//!   document or reject it, before any of its contents are trusted.
//!
//! # Invariants
//! - Pure predicate: no side effects, no partial acceptance.
//! - A single malformed system invalidates the entire document.
//! - No error detail is produced; callers own user-facing messaging.

use serde_json::Value;

const SYSTEM_KEYS: [&str; 5] = ["name", "glyphs", "tags", "buy", "sell"];
const ITEM_KEYS: [&str; 3] = ["name", "price", "percent"];

/// Accepts a catalog document in either of its two wire forms.
///
/// # Contract
/// - A sequence is treated as a direct sequence of systems.
/// - A mapping is accepted when it contains a `"systems"` key holding a
///   sequence of systems; extra top-level keys are tolerated.
/// - Everything else is rejected.
pub fn verify_catalog(value: &Value) -> bool {
    match value {
        Value::Array(systems) => systems.iter().all(verify_system),
        Value::Object(map) => match map.get("systems") {
            Some(Value::Array(systems)) => systems.iter().all(verify_system),
            _ => false,
        },
        _ => false,
    }
}

/// Accepts a candidate system.
///
/// The key set must be exactly `name`, `glyphs`, `tags`, `buy`, `sell`
/// (no extra, no missing), and both market lists must hold valid items.
/// Scalar fields are not type-checked here; the typed decode on import is
/// the authority for those.
pub fn verify_system(value: &Value) -> bool {
    let Value::Object(map) = value else {
        return false;
    };

    if map.len() != SYSTEM_KEYS.len() || !SYSTEM_KEYS.iter().all(|key| map.contains_key(*key)) {
        return false;
    }

    verify_item_list(&map["buy"]) && verify_item_list(&map["sell"])
}

fn verify_item_list(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().all(verify_item),
        _ => false,
    }
}

/// Accepts a candidate item.
///
/// Unlike systems, the contract is containment: the three typed keys must be
/// present, extra keys are tolerated.
pub fn verify_item(value: &Value) -> bool {
    let Value::Object(map) = value else {
        return false;
    };

    ITEM_KEYS.iter().all(|key| map.contains_key(*key))
        && map["name"].is_string()
        && map["price"].is_number()
        && map["percent"].is_number()
}
