//! Catalog search filter.
//!
//! # Responsibility
//! - Select the systems whose chosen market side matches an item-name
//!   query, for display collaborators.
//!
//! # Invariants
//! - Matching is case-insensitive substring containment over item names.
//! - A system whose chosen side holds no items is never returned.

use crate::model::system::{Item, System};

/// Which market list of a system a query applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketSide {
    Buy,
    Sell,
}

impl MarketSide {
    fn items(self, system: &System) -> &[Item] {
        match self {
            Self::Buy => &system.buy,
            Self::Sell => &system.sell,
        }
    }
}

/// Filters systems by item-name substring on one market side.
///
/// A blank query matches every item, so the result is all systems with a
/// non-empty chosen side. The buy and sell displays apply this filter
/// independently.
pub fn matching_systems<'a>(
    systems: &'a [System],
    query: &str,
    side: MarketSide,
) -> Vec<&'a System> {
    let needle = query.to_lowercase();
    systems
        .iter()
        .filter(|system| {
            let items = side.items(system);
            !items.is_empty()
                && items
                    .iter()
                    .any(|item| item.name.to_lowercase().contains(&needle))
        })
        .collect()
}
