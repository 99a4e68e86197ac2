//! Headless game interface for programmatic use.
//!
//! [`HeadlessGame`] drives a [`Dungeon`] from lines of text, the same way a
//! terminal player would, but hands every piece of output back as a string.
//! It is used for:
//! - The interactive binary
//! - Scripted sessions and tests
//! - Agents playing the game
//!
//! # Example
//!
//! ```
//! use dungeon_core::headless::{HeadlessConfig, HeadlessGame, PlayerClass};
//!
//! let config = HeadlessConfig::quick_start("Gandalf")
//!     .with_class(PlayerClass::Wizard)
//!     .with_seed(7);
//! let mut game = HeadlessGame::new(config).unwrap();
//!
//! println!("{}", game.status_text());
//! println!("{}", game.options_text());
//!
//! let resolution = game.choose("0");
//! println!("{}", resolution.narrative);
//! ```

use crate::character::Character;
use crate::dice::{DiceSource, RandomDice};
use crate::dungeon::{create_standard_dungeon, Dungeon, Outcome};
use crate::error::WorldError;
use crate::rules::{Action, Resolution, RulesEngine};
use crate::selection::parse_selection;
use serde::{Deserialize, Serialize};

/// Which kind of hero to play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerClass {
    #[default]
    Wizard,
    Warrior,
}

impl PlayerClass {
    /// Create a fresh character of this class.
    pub fn build(self, name: impl Into<String>) -> Character {
        match self {
            PlayerClass::Wizard => Character::wizard(name),
            PlayerClass::Warrior => Character::warrior(name),
        }
    }
}

/// Configuration for a headless game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessConfig {
    /// Character name.
    pub name: String,
    /// Character class.
    pub class: PlayerClass,
    /// Seed for the dice. `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl HeadlessConfig {
    /// A wizard with unseeded dice.
    pub fn quick_start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: PlayerClass::default(),
            seed: None,
        }
    }

    pub fn with_class(mut self, class: PlayerClass) -> Self {
        self.class = class;
        self
    }

    /// Make every roll reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Point-in-time view of a game, for machine consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub turn: usize,
    pub player: String,
    pub health: i32,
    pub strength: i32,
    pub craft: i32,
    pub left_hand: Option<String>,
    pub right_hand: Option<String>,
    pub chamber: usize,
    pub goal: usize,
    pub finished: bool,
    pub outcome: Option<Outcome>,
    pub actions: Vec<String>,
}

impl GameSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A dungeon game that can be controlled programmatically.
pub struct HeadlessGame {
    dungeon: Dungeon,
    dice: Box<dyn DiceSource>,
    engine: RulesEngine,
    turns: usize,
}

impl HeadlessGame {
    /// Start a new game in the standard dungeon.
    pub fn new(config: HeadlessConfig) -> Result<Self, WorldError> {
        let player = config.class.build(config.name);
        let dungeon = create_standard_dungeon(player)?;
        let dice = match config.seed {
            Some(seed) => RandomDice::seeded(seed),
            None => RandomDice::from_entropy(),
        };
        tracing::info!(seed = ?config.seed, class = ?config.class, "starting game");
        Ok(Self::from_dungeon(dungeon, Box::new(dice)))
    }

    /// Play an arbitrary dungeon with arbitrary dice.
    pub fn from_dungeon(dungeon: Dungeon, dice: Box<dyn DiceSource>) -> Self {
        Self {
            dungeon,
            dice,
            engine: RulesEngine::new(),
            turns: 0,
        }
    }

    /// Take one turn from a line of player input.
    ///
    /// Input that does not select an option still counts as a turn, resolved
    /// as an [`Action::Error`] that leaves the dungeon untouched.
    pub fn choose(&mut self, input: &str) -> Resolution {
        let actions = self.dungeon.actions();
        let action = match parse_selection(input, actions.len()) {
            Ok(index) => actions[index].clone(),
            Err(err) => {
                tracing::debug!(%err, input, "rejected selection");
                Action::error(err)
            }
        };
        self.turns += 1;
        self.engine
            .execute(&mut self.dungeon, &action, self.dice.as_mut())
    }

    /// Every legal action right now, in option order.
    pub fn actions(&self) -> Vec<Action> {
        self.dungeon.actions()
    }

    /// Describe the current chamber and the player.
    pub fn status_text(&self) -> String {
        let chamber = self.dungeon.current();
        let graph = self.dungeon.graph();
        let mut s = String::new();

        s.push_str(&format!(
            "You are in a chamber with {} doors\n",
            chamber.doors().len()
        ));
        s.push_str(&format!(
            "There are {} items in the chamber\n",
            chamber.items().len()
        ));

        if !chamber.doors().is_empty() {
            s.push_str("\nDoors:\n");
            for door in graph.doors_of(chamber.id) {
                match door.guardian() {
                    Some(monster) if door.is_locked() => {
                        s.push_str(&format!("  - Door guarded by: {monster}\n"));
                    }
                    _ => s.push_str("  - Unguarded door\n"),
                }
            }
        }

        if !chamber.items().is_empty() {
            s.push_str("\nItems in this chamber:\n");
            for item in chamber.items() {
                s.push_str(&format!("  - {item}\n"));
            }
        }

        let player = self.dungeon.player();
        s.push_str(&format!(
            "\nPlayer status: {} - Health: {}, Strength: {}, Craft: {}",
            player.name,
            player.health(),
            player.total_strength(),
            player.total_craft()
        ));

        if player.left_hand().is_some() || player.right_hand().is_some() {
            s.push_str("\nEquipped: ");
            if let Some(item) = player.left_hand() {
                s.push_str(&format!("Left hand: {} ", item.name));
            }
            if let Some(item) = player.right_hand() {
                s.push_str(&format!("Right hand: {}", item.name));
            }
        }

        s
    }

    /// The numbered option list.
    pub fn options_text(&self) -> String {
        let mut s = String::from("\nHere are your options:\n");
        for (i, action) in self.dungeon.actions().iter().enumerate() {
            s.push_str(&format!("\t{i}: {}\n", action.describe(&self.dungeon)));
        }
        s
    }

    pub fn is_finished(&self) -> bool {
        self.dungeon.is_finished()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.dungeon.outcome()
    }

    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    /// Number of inputs handled so far, rejected ones included.
    pub fn turn_count(&self) -> usize {
        self.turns
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let player = self.dungeon.player();
        GameSnapshot {
            turn: self.turns,
            player: player.name.clone(),
            health: player.health(),
            strength: player.total_strength(),
            craft: player.total_craft(),
            left_hand: player.left_hand().map(|item| item.name.clone()),
            right_hand: player.right_hand().map(|item| item.name.clone()),
            chamber: self.dungeon.current_chamber().index(),
            goal: self.dungeon.goal_chamber().index(),
            finished: self.dungeon.is_finished(),
            outcome: self.dungeon.outcome(),
            actions: self
                .dungeon
                .actions()
                .iter()
                .map(|action| action.describe(&self.dungeon))
                .collect(),
        }
    }
}

impl std::fmt::Debug for HeadlessGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessGame")
            .field("dungeon", &self.dungeon)
            .field("turns", &self.turns)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::LoadedDice;

    fn loaded_game(script: impl IntoIterator<Item = u32>) -> HeadlessGame {
        let dungeon = create_standard_dungeon(Character::wizard("Gandalf")).unwrap();
        HeadlessGame::from_dungeon(dungeon, Box::new(LoadedDice::cycle(script)))
    }

    #[test]
    fn test_quick_start_config() {
        let config = HeadlessConfig::quick_start("Gandalf");
        assert_eq!(config.name, "Gandalf");
        assert_eq!(config.class, PlayerClass::Wizard);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_config_builder() {
        let config = HeadlessConfig::quick_start("Thor")
            .with_class(PlayerClass::Warrior)
            .with_seed(42);
        assert_eq!(config.class, PlayerClass::Warrior);
        assert_eq!(config.seed, Some(42));

        let game = HeadlessGame::new(config).unwrap();
        assert_eq!(game.dungeon().player().health(), 20);
        assert_eq!(game.dungeon().player().name, "Thor");
    }

    #[test]
    fn test_initial_status_text() {
        let game = HeadlessGame::new(HeadlessConfig::quick_start("Gandalf")).unwrap();
        assert_eq!(
            game.status_text(),
            "You are in a chamber with 1 doors\n\
             There are 0 items in the chamber\n\
             \n\
             Doors:\n  - Unguarded door\n\
             \n\
             Player status: Gandalf - Health: 15, Strength: 2, Craft: 5"
        );
    }

    #[test]
    fn test_options_text() {
        let game = HeadlessGame::new(HeadlessConfig::quick_start("Gandalf")).unwrap();
        assert_eq!(
            game.options_text(),
            "\nHere are your options:\n\t0: Move through Unguarded door to another chamber\n"
        );
    }

    #[test]
    fn test_status_shows_guardians_items_and_equipment() {
        let mut game = loaded_game([6, 1]);
        game.choose("0");
        game.choose("2");

        let status = game.status_text();
        assert!(status.contains("You are in a chamber with 2 doors"));
        assert!(status.contains("There are 0 items in the chamber"));
        assert!(status.contains("  - Door guarded by: Goblin (Strength: 1, Health: 3)"));
        assert!(status.contains("Strength: 5, Craft: 5"));
        assert!(status.ends_with("Equipped: Left hand: Axe "));
    }

    #[test]
    fn test_status_lines_in_order() {
        let mut game = loaded_game([6, 1]);
        game.choose("0");
        game.choose("2");
        game.choose("1");
        game.choose("1");

        let status = game.status_text();
        let lines: Vec<&str> = status.lines().collect();
        assert_eq!(lines[0], "You are in a chamber with 2 doors");
        assert_eq!(lines[1], "There are 1 items in the chamber");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "Doors:");
        assert_eq!(lines[4], "  - Unguarded door");
        assert!(lines[5].starts_with("  - Door guarded by: Spider"));
        assert_eq!(lines[6], "");
        assert_eq!(lines[7], "Items in this chamber:");
        assert_eq!(lines[8], "  - Shield (Strength: 1, Craft: 1)");
        assert_eq!(lines[9], "");
        assert_eq!(
            lines[10],
            "Player status: Gandalf - Health: 15, Strength: 5, Craft: 5"
        );
        assert_eq!(lines[11], "Equipped: Left hand: Axe ");
        assert_eq!(lines.len(), 12);
        assert!(!status.ends_with('\n'));
    }

    #[test]
    fn test_choose_counts_rejected_input() {
        let mut game = loaded_game([1]);
        let resolution = game.choose("banana");

        assert_eq!(
            resolution.narrative,
            "Error: Please enter a valid number\nPlease enter a valid number from the options above."
        );
        assert_eq!(game.turn_count(), 1);
        assert_eq!(game.dungeon().current_chamber().index(), 0);

        let resolution = game.choose("5");
        assert!(resolution
            .narrative
            .starts_with("Error: Invalid choice. Please enter a number between 0 and 0"));
        assert_eq!(game.turn_count(), 2);
    }

    #[test]
    fn test_seeded_games_replay() {
        let play = |seed| {
            let config = HeadlessConfig::quick_start("Gandalf").with_seed(seed);
            let mut game = HeadlessGame::new(config).unwrap();
            let mut log = Vec::new();
            for input in ["0", "0", "1", "2", "1", "1", "1"] {
                log.push(game.choose(input).narrative);
            }
            (log, game.snapshot())
        };
        assert_eq!(play(99), play(99));
    }

    #[test]
    fn test_snapshot_json() {
        let mut game = loaded_game([1]);
        game.choose("0");
        let snapshot = game.snapshot();

        assert_eq!(snapshot.turn, 1);
        assert_eq!(snapshot.chamber, 1);
        assert_eq!(snapshot.goal, 4);
        assert!(!snapshot.finished);
        assert_eq!(snapshot.outcome, None);
        assert_eq!(snapshot.actions.len(), 3);

        let json = snapshot.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["player"], "Gandalf");
        assert_eq!(value["health"], 15);
        assert_eq!(value["outcome"], serde_json::Value::Null);
        assert_eq!(value["left_hand"], serde_json::Value::Null);

        game.choose("2");
        assert_eq!(game.snapshot().left_hand.as_deref(), Some("Axe"));
        assert_eq!(game.snapshot().strength, 5);
    }
}
