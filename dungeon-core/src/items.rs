//! Equippable items.
//!
//! Items carry flat strength and craft bonuses that count toward a
//! character's totals while held in one of its hands.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for items.
///
/// Every constructed item gets a fresh id, so two axes are still two
/// different items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An item that can lie in a chamber, be carried, and be held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub strength: i32,
    pub craft: i32,
}

impl Item {
    pub fn new(name: impl Into<String>, strength: i32, craft: i32) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            strength,
            craft,
        }
    }

    /// A heavy axe: +3 strength.
    pub fn axe() -> Self {
        Self::new("Axe", 3, 0)
    }

    /// A shield: +1 strength, +1 craft.
    pub fn shield() -> Self {
        Self::new("Shield", 1, 1)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Strength: {}, Craft: {})",
            self.name, self.strength, self.craft
        )
    }
}
