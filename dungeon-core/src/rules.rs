//! Action resolution.
//!
//! Every turn runs the same pipeline:
//! 1. The driver picks an [`Action`] from [`Dungeon::actions`]
//! 2. [`RulesEngine::resolve`] works out what happens, rolling dice as needed
//! 3. The outcome is described as a list of [`Effect`]s plus narrative text
//! 4. [`apply_effects`] writes the effects into the dungeon
//!
//! Resolving never mutates the dungeon, so a resolution can be inspected
//! before (or instead of) being applied.

use crate::character::{Character, CharacterId, Hand};
use crate::dice::{DiceSource, Die};
use crate::dungeon::Dungeon;
use crate::items::ItemId;
use crate::world::{ChamberId, DoorId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One thing the player can do this turn.
///
/// Actions are built fresh from the dungeon each turn and consumed right
/// away; they hold handles into the dungeon, not copies of its state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Walk through an open door
    Move { door: DoorId },

    /// Trade one round of blows with a door's guardian
    Fight { door: DoorId, monster: CharacterId },

    /// Take an item from the current chamber
    Pick { item: ItemId },

    /// Stand-in for input that did not name an action. Only reports the
    /// message.
    Error { message: String },
}

impl Action {
    /// Wrap a problem with the player's input.
    pub fn error(message: impl fmt::Display) -> Self {
        Action::Error {
            message: message.to_string(),
        }
    }

    /// Human-readable label for an option list.
    pub fn describe(&self, dungeon: &Dungeon) -> String {
        let graph = dungeon.graph();
        match self {
            Action::Move { door } => match graph.door(*door) {
                Some(door) => format!("Move through {door} to another chamber"),
                None => "Move through a door that is not there".to_string(),
            },
            Action::Fight { door, .. } => {
                match graph.door(*door).and_then(|door| door.guardian()) {
                    Some(monster) => format!("Fight {monster}"),
                    None => "Fight nobody".to_string(),
                }
            }
            Action::Pick { item } => match dungeon.current().item(*item) {
                Some(item) => format!("Pick up {item}"),
                None => "Pick up an item that is no longer here".to_string(),
            },
            Action::Error { message } => format!("Error: {message}"),
        }
    }
}

/// A side of a fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combatant {
    Player,
    Guardian { door: DoorId },
}

/// A concrete change to the dungeon, or a record of a roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// A die was rolled and added to a combat stat
    DiceRolled {
        combatant: Combatant,
        die: Die,
        roll: u32,
        stat: i32,
        total: i32,
    },

    /// The player walked through a door
    Moved {
        door: DoorId,
        from: ChamberId,
        to: ChamberId,
    },

    /// Someone lost health
    DamageDealt {
        target: Combatant,
        amount: i32,
        remaining: i32,
    },

    /// A guardian died and left its door for good
    GuardianDefeated { door: DoorId, monster: CharacterId },

    /// Both combat totals were equal
    CombatTied,

    /// An item moved from the current chamber into the player's inventory,
    /// and into `hand` if one was free
    ItemTaken { item: ItemId, hand: Option<Hand> },
}

/// The result of resolving an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub effects: Vec<Effect>,
    pub narrative: String,
}

impl Resolution {
    pub fn new(narrative: impl Into<String>) -> Self {
        Self {
            effects: Vec::new(),
            narrative: narrative.into(),
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// The hand a newly picked-up item goes into: left if free, else right if
/// free, else none.
pub fn free_hand(character: &Character) -> Option<Hand> {
    [Hand::Left, Hand::Right]
        .into_iter()
        .find(|hand| character.hand(*hand).is_none())
}

/// Resolves actions into effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct RulesEngine;

impl RulesEngine {
    pub fn new() -> Self {
        Self
    }

    /// Resolve an action against the current state of the dungeon.
    pub fn resolve<D: DiceSource + ?Sized>(
        &self,
        dungeon: &Dungeon,
        action: &Action,
        dice: &mut D,
    ) -> Resolution {
        match action {
            Action::Move { door } => self.resolve_move(dungeon, *door),
            Action::Fight { door, monster } => self.resolve_fight(dungeon, *door, *monster, dice),
            Action::Pick { item } => self.resolve_pick(dungeon, *item),
            Action::Error { message } => Resolution::new(format!(
                "Error: {message}\nPlease enter a valid number from the options above."
            )),
        }
    }

    /// Resolve an action and apply its effects.
    pub fn execute<D: DiceSource + ?Sized>(
        &self,
        dungeon: &mut Dungeon,
        action: &Action,
        dice: &mut D,
    ) -> Resolution {
        let resolution = self.resolve(dungeon, action, dice);
        apply_effects(dungeon, &resolution.effects);
        resolution
    }

    fn resolve_move(&self, dungeon: &Dungeon, door_id: DoorId) -> Resolution {
        let Some(door) = dungeon.graph().door(door_id) else {
            tracing::warn!(door = %door_id, "move through unknown door");
            return Resolution::new("There is no such door.");
        };
        if let Some(guardian) = door.guardian().filter(|_| door.is_locked()) {
            return Resolution::new(format!("The door is guarded by {guardian}."));
        }

        let from = dungeon.current_chamber();
        match door.other_chamber(from) {
            Some(to) => Resolution::new("You moved to a new chamber.").with_effect(Effect::Moved {
                door: door_id,
                from,
                to,
            }),
            None => {
                tracing::warn!(door = %door_id, chamber = %from, "door does not touch current chamber");
                Resolution::new("That door does not lead anywhere from here.")
            }
        }
    }

    fn resolve_fight<D: DiceSource + ?Sized>(
        &self,
        dungeon: &Dungeon,
        door_id: DoorId,
        monster_id: CharacterId,
        dice: &mut D,
    ) -> Resolution {
        let Some(door) = dungeon.graph().door(door_id) else {
            tracing::warn!(door = %door_id, "fight at unknown door");
            return Resolution::new("There is no such door.");
        };
        if !door.connects(dungeon.current_chamber()) {
            tracing::warn!(door = %door_id, "fight at a door in another chamber");
            return Resolution::new("That door is not in this chamber.");
        }
        let Some(monster) = door
            .guardian()
            .filter(|guardian| guardian.id == monster_id && guardian.is_alive())
        else {
            return Resolution::new("There is nothing left to fight here.");
        };

        let player = dungeon.player();
        let use_strength = monster.uses_strength();
        let (player_stat, monster_stat) = if use_strength {
            (player.total_strength(), monster.strength())
        } else {
            (player.total_craft(), monster.craft())
        };

        let player_roll = dice.roll(Die::D6);
        let monster_roll = dice.roll(Die::D6);
        let player_total = player_stat.saturating_add(player_roll as i32);
        let monster_total = monster_stat.saturating_add(monster_roll as i32);

        tracing::debug!(
            monster = %monster.name,
            use_strength,
            player_roll,
            player_total,
            monster_roll,
            monster_total,
            "combat round"
        );

        let mut lines = vec![
            format!("You are fighting {monster}"),
            format!("You rolled a {player_roll} + {player_stat} = {player_total}"),
            format!(
                "The {} rolled a {monster_roll} + {monster_stat} = {monster_total}",
                monster.name
            ),
        ];
        let mut effects = vec![
            Effect::DiceRolled {
                combatant: Combatant::Player,
                die: Die::D6,
                roll: player_roll,
                stat: player_stat,
                total: player_total,
            },
            Effect::DiceRolled {
                combatant: Combatant::Guardian { door: door_id },
                die: Die::D6,
                roll: monster_roll,
                stat: monster_stat,
                total: monster_total,
            },
        ];

        if player_total > monster_total {
            let damage = player_total.saturating_sub(monster_total);
            let remaining = monster.health().saturating_sub(damage).max(0);
            lines.push(format!("You hit the {} for {damage} damage!", monster.name));
            effects.push(Effect::DamageDealt {
                target: Combatant::Guardian { door: door_id },
                amount: damage,
                remaining,
            });
            if remaining == 0 {
                lines.push(format!("You defeated the {}!", monster.name));
                effects.push(Effect::GuardianDefeated {
                    door: door_id,
                    monster: monster.id,
                });
            } else {
                lines.push(format!(
                    "The {} has {remaining} health remaining.",
                    monster.name
                ));
            }
        } else if monster_total > player_total {
            let damage = monster_total.saturating_sub(player_total);
            let remaining = player.health().saturating_sub(damage).max(0);
            lines.push(format!("The {} hit you for {damage} damage!", monster.name));
            effects.push(Effect::DamageDealt {
                target: Combatant::Player,
                amount: damage,
                remaining,
            });
            if remaining == 0 {
                lines.push("You have been defeated!".to_string());
            } else {
                lines.push(format!("You have {remaining} health remaining."));
            }
        } else {
            lines.push("You both missed!".to_string());
            effects.push(Effect::CombatTied);
        }

        Resolution::new(lines.join("\n")).with_effects(effects)
    }

    fn resolve_pick(&self, dungeon: &Dungeon, item_id: ItemId) -> Resolution {
        let Some(item) = dungeon.current().item(item_id) else {
            return Resolution::new("The item is no longer in the chamber.");
        };

        let hand = free_hand(dungeon.player());
        let equip_line = match hand {
            Some(hand) => format!("You equipped {item} in your {hand} hand."),
            None => "Both hands are full. Item added to inventory.".to_string(),
        };

        Resolution::new(format!("You picked up {item}\n{equip_line}"))
            .with_effect(Effect::ItemTaken {
                item: item_id,
                hand,
            })
    }
}

/// Apply effects to the dungeon.
pub fn apply_effects(dungeon: &mut Dungeon, effects: &[Effect]) {
    for effect in effects {
        apply_effect(dungeon, effect);
    }
}

/// Apply a single effect to the dungeon.
pub fn apply_effect(dungeon: &mut Dungeon, effect: &Effect) {
    match effect {
        Effect::DiceRolled { .. } | Effect::CombatTied => {}
        Effect::Moved { to, .. } => {
            if let Err(err) = dungeon.set_current_chamber(*to) {
                tracing::warn!(%err, "ignoring move");
            }
        }
        Effect::DamageDealt {
            target: Combatant::Player,
            amount,
            ..
        } => {
            let alive = dungeon.player_mut().take_damage(*amount);
            if !alive {
                tracing::info!("player died");
            }
        }
        Effect::DamageDealt {
            target: Combatant::Guardian { door },
            amount,
            ..
        } => {
            match dungeon
                .graph_mut()
                .door_mut(*door)
                .and_then(|door| door.guardian_mut())
            {
                Some(guardian) => {
                    guardian.take_damage(*amount);
                }
                None => tracing::warn!(%door, "no guardian to damage"),
            }
        }
        Effect::GuardianDefeated { door, .. } => {
            if let Some(door) = dungeon.graph_mut().door_mut(*door) {
                if let Some(guardian) = door.remove_guardian() {
                    tracing::info!(door = %door.id, monster = %guardian.name, "guardian defeated");
                }
            }
        }
        Effect::ItemTaken { item, hand } => {
            let current = dungeon.current_chamber();
            // Claiming the item from the chamber is what decides the pickup
            let claimed = dungeon
                .graph_mut()
                .chamber_mut(current)
                .and_then(|chamber| chamber.remove_item(*item));
            let Some(item) = claimed else {
                tracing::warn!(%item, "item already taken");
                return;
            };

            tracing::info!(item = %item.name, hand = ?hand, "item picked up");
            let player = dungeon.player_mut();
            if let Some(hand) = hand {
                player.set_hand(*hand, Some(item.clone()));
            }
            player.add_item(item);
        }
    }
}
