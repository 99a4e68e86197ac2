//! The chamber graph.
//!
//! Chambers and doors live in a [`ChamberGraph`] arena and refer to each
//! other by index: a door stores the ids of its two chambers, a chamber
//! stores the ids of its doors in the order they were connected. Chambers
//! are never created or destroyed once play starts; doors only ever lose
//! their guardian.

use crate::character::Character;
use crate::error::WorldError;
use crate::items::{Item, ItemId};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Handles
// ============================================================================

/// Index of a chamber in its [`ChamberGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChamberId(usize);

impl ChamberId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ChamberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chamber {}", self.0)
    }
}

/// Index of a door in its [`ChamberGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DoorId(usize);

impl DoorId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for DoorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "door {}", self.0)
    }
}

// ============================================================================
// Chambers
// ============================================================================

/// A room. Owns the items lying in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chamber {
    pub id: ChamberId,
    doors: Vec<DoorId>,
    items: Vec<Item>,
}

impl Chamber {
    fn new(id: ChamberId) -> Self {
        Self {
            id,
            doors: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Doors in the order they were connected.
    pub fn doors(&self) -> &[DoorId] {
        &self.doors
    }

    /// Items in the order they were placed.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Take an item out of the chamber. `None` if it is not here (anymore).
    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    fn add_door(&mut self, door: DoorId) {
        self.doors.push(door);
    }
}

// ============================================================================
// Doors
// ============================================================================

/// An undirected passage between two chambers, possibly guarded.
///
/// A door is locked exactly while it has a living guardian.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Door {
    pub id: DoorId,
    chambers: [ChamberId; 2],
    guardian: Option<Character>,
}

impl Door {
    pub fn chambers(&self) -> [ChamberId; 2] {
        self.chambers
    }

    pub fn connects(&self, chamber: ChamberId) -> bool {
        self.chambers.contains(&chamber)
    }

    /// The chamber on the far side when coming from `from`, or `None` if
    /// `from` is not one of this door's chambers.
    pub fn other_chamber(&self, from: ChamberId) -> Option<ChamberId> {
        match self.chambers {
            [a, b] if a == from => Some(b),
            [a, b] if b == from => Some(a),
            _ => None,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.guardian.as_ref().is_some_and(Character::is_alive)
    }

    pub fn guardian(&self) -> Option<&Character> {
        self.guardian.as_ref()
    }

    pub fn guardian_mut(&mut self) -> Option<&mut Character> {
        self.guardian.as_mut()
    }

    /// Drop the guardian, unlocking the door for good.
    pub fn remove_guardian(&mut self) -> Option<Character> {
        self.guardian.take()
    }
}

impl fmt::Display for Door {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.guardian {
            Some(guardian) if self.is_locked() => write!(f, "Door guarded by {guardian}"),
            _ => write!(f, "Unguarded door"),
        }
    }
}

// ============================================================================
// Graph
// ============================================================================

/// Arena owning every chamber and door of a dungeon.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChamberGraph {
    chambers: Vec<Chamber>,
    doors: Vec<Door>,
}

impl ChamberGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty chamber.
    pub fn add_chamber(&mut self) -> ChamberId {
        let id = ChamberId(self.chambers.len());
        self.chambers.push(Chamber::new(id));
        id
    }

    /// Add a chamber with one item lying in it.
    pub fn add_chamber_with_item(&mut self, item: Item) -> ChamberId {
        let id = self.add_chamber();
        self.chambers[id.0].add_item(item);
        id
    }

    /// Place an item in an existing chamber.
    pub fn place_item(&mut self, chamber: ChamberId, item: Item) -> Result<(), WorldError> {
        self.chamber_mut(chamber)
            .ok_or(WorldError::UnknownChamber(chamber))?
            .add_item(item);
        Ok(())
    }

    /// Connect two chambers with an unguarded door.
    pub fn connect(&mut self, a: ChamberId, b: ChamberId) -> Result<DoorId, WorldError> {
        self.insert_door(a, b, None)
    }

    /// Connect two chambers with a door held by `guardian`.
    pub fn connect_guarded(
        &mut self,
        a: ChamberId,
        b: ChamberId,
        guardian: Character,
    ) -> Result<DoorId, WorldError> {
        self.insert_door(a, b, Some(guardian))
    }

    fn insert_door(
        &mut self,
        a: ChamberId,
        b: ChamberId,
        guardian: Option<Character>,
    ) -> Result<DoorId, WorldError> {
        for chamber in [a, b] {
            if !self.contains(chamber) {
                return Err(WorldError::UnknownChamber(chamber));
            }
        }
        if a == b {
            return Err(WorldError::SelfLoop(a));
        }

        let id = DoorId(self.doors.len());
        self.doors.push(Door {
            id,
            chambers: [a, b],
            guardian,
        });
        // One shared door, registered on both sides
        self.chambers[a.0].add_door(id);
        self.chambers[b.0].add_door(id);
        Ok(id)
    }

    pub fn contains(&self, chamber: ChamberId) -> bool {
        chamber.0 < self.chambers.len()
    }

    pub fn chamber(&self, id: ChamberId) -> Option<&Chamber> {
        self.chambers.get(id.0)
    }

    pub fn chamber_mut(&mut self, id: ChamberId) -> Option<&mut Chamber> {
        self.chambers.get_mut(id.0)
    }

    pub fn door(&self, id: DoorId) -> Option<&Door> {
        self.doors.get(id.0)
    }

    pub fn door_mut(&mut self, id: DoorId) -> Option<&mut Door> {
        self.doors.get_mut(id.0)
    }

    pub fn chambers(&self) -> &[Chamber] {
        &self.chambers
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    /// The doors of `chamber`, resolved, in connection order.
    pub fn doors_of(&self, chamber: ChamberId) -> impl Iterator<Item = &Door> + '_ {
        self.chamber(chamber)
            .into_iter()
            .flat_map(|c| c.doors().iter())
            .filter_map(|id| self.door(*id))
    }
}
