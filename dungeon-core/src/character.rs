//! Player characters and monsters.
//!
//! Wizards, warriors and monsters share one stat model and differ only in
//! their starting values, so they are a single [`Character`] type tagged
//! with a [`CharacterRole`].

use crate::items::Item;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterRole {
    Wizard,
    Warrior,
    Monster,
}

impl CharacterRole {
    pub fn name(&self) -> &'static str {
        match self {
            CharacterRole::Wizard => "Wizard",
            CharacterRole::Warrior => "Warrior",
            CharacterRole::Monster => "Monster",
        }
    }
}

impl fmt::Display for CharacterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One of the two equip slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub fn name(&self) -> &'static str {
        match self {
            Hand::Left => "left",
            Hand::Right => "right",
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A creature with health, base stats, two hands and an inventory.
///
/// Health never drops below zero. A character is alive while its health is
/// above zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub role: CharacterRole,
    health: i32,
    strength: i32,
    craft: i32,
    left_hand: Option<Item>,
    right_hand: Option<Item>,
    inventory: Vec<Item>,
}

impl Character {
    pub fn new(
        name: impl Into<String>,
        role: CharacterRole,
        health: i32,
        strength: i32,
        craft: i32,
    ) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            role,
            health: health.max(0),
            strength,
            craft,
            left_hand: None,
            right_hand: None,
            inventory: Vec::new(),
        }
    }

    /// A wizard: health 15, strength 2, craft 5.
    pub fn wizard(name: impl Into<String>) -> Self {
        Self::new(name, CharacterRole::Wizard, 15, 2, 5)
    }

    /// A warrior: health 20, strength 5, craft 2.
    pub fn warrior(name: impl Into<String>) -> Self {
        Self::new(name, CharacterRole::Warrior, 20, 5, 2)
    }

    /// A monster. Give it either strength or craft; a monster with zero craft
    /// fights on strength.
    pub fn monster(name: impl Into<String>, strength: i32, craft: i32, health: i32) -> Self {
        Self::new(name, CharacterRole::Monster, health, strength, craft)
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    /// Overwrite health, flooring at zero.
    pub fn set_health(&mut self, health: i32) {
        self.health = health.max(0);
    }

    pub fn strength(&self) -> i32 {
        self.strength
    }

    pub fn craft(&self) -> i32 {
        self.craft
    }

    /// Whether this character fights on strength rather than craft.
    pub fn uses_strength(&self) -> bool {
        self.craft == 0
    }

    fn held(&self) -> impl Iterator<Item = &Item> {
        self.left_hand.iter().chain(self.right_hand.iter())
    }

    /// Base strength plus the bonuses of held items, saturating at the
    /// bounds of `i32`.
    pub fn total_strength(&self) -> i32 {
        self.held()
            .fold(self.strength, |total, item| total.saturating_add(item.strength))
    }

    /// Base craft plus the bonuses of held items, saturating at the bounds of
    /// `i32`.
    pub fn total_craft(&self) -> i32 {
        self.held()
            .fold(self.craft, |total, item| total.saturating_add(item.craft))
    }

    /// Subtract `amount` from health, flooring at zero, and report whether
    /// the character is still alive.
    ///
    /// A negative amount raises health with no upper bound.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health = self.health.saturating_sub(amount).max(0);
        self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    /// Carry an item. Nothing is deduplicated and there is no capacity limit.
    pub fn add_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    pub fn left_hand(&self) -> Option<&Item> {
        self.left_hand.as_ref()
    }

    pub fn right_hand(&self) -> Option<&Item> {
        self.right_hand.as_ref()
    }

    pub fn set_left_hand(&mut self, item: Option<Item>) {
        self.left_hand = item;
    }

    pub fn set_right_hand(&mut self, item: Option<Item>) {
        self.right_hand = item;
    }

    pub fn hand(&self, hand: Hand) -> Option<&Item> {
        match hand {
            Hand::Left => self.left_hand(),
            Hand::Right => self.right_hand(),
        }
    }

    pub fn set_hand(&mut self, hand: Hand, item: Option<Item>) {
        match hand {
            Hand::Left => self.set_left_hand(item),
            Hand::Right => self.set_right_hand(item),
        }
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role {
            CharacterRole::Monster if self.uses_strength() => write!(
                f,
                "{} (Strength: {}, Health: {})",
                self.name, self.strength, self.health
            ),
            CharacterRole::Monster => write!(
                f,
                "{} (Craft: {}, Health: {})",
                self.name, self.craft, self.health
            ),
            role => write!(
                f,
                "{} {} (Health: {}, Strength: {}, Craft: {})",
                role, self.name, self.health, self.strength, self.craft
            ),
        }
    }
}
