//! Turn-based dungeon crawler engine.
//!
//! This crate provides:
//! - A chamber graph of rooms joined by doors, some guarded by monsters
//! - Wizard, warrior and monster characters with two-handed equipment
//! - Action/Effect rules system with injectable dice for deterministic play
//! - A headless driver that plays the game from lines of text
//!
//! # Quick Start
//!
//! ```
//! use dungeon_core::{HeadlessConfig, HeadlessGame};
//!
//! let mut game = HeadlessGame::new(HeadlessConfig::quick_start("Gandalf").with_seed(1)).unwrap();
//!
//! while !game.is_finished() && game.turn_count() < 50 {
//!     println!("{}", game.status_text());
//!     let resolution = game.choose("0");
//!     println!("{}", resolution.narrative);
//! }
//! ```

pub mod character;
pub mod dice;
pub mod dungeon;
pub mod error;
pub mod headless;
pub mod items;
pub mod rules;
pub mod selection;
pub mod testing;
pub mod world;

// Primary public API
pub use character::{Character, CharacterId, CharacterRole, Hand};
pub use dice::{DiceSource, Die, LoadedDice, RandomDice};
pub use dungeon::{create_standard_dungeon, Dungeon, Outcome};
pub use error::{SelectionError, WorldError};
pub use headless::{GameSnapshot, HeadlessConfig, HeadlessGame, PlayerClass};
pub use items::{Item, ItemId};
pub use rules::{apply_effects, Action, Effect, Resolution, RulesEngine};
pub use selection::parse_selection;
pub use testing::TestHarness;
pub use world::{Chamber, ChamberGraph, ChamberId, Door, DoorId};
