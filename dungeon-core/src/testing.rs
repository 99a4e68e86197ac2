//! Testing utilities for the dungeon game.
//!
//! This module provides tools for integration testing:
//! - `TestHarness` for scripted game scenarios with loaded dice
//! - Assertion helpers for verifying game state

use crate::character::Character;
use crate::dice::LoadedDice;
use crate::dungeon::{create_standard_dungeon, Dungeon, Outcome};
use crate::rules::{Action, Resolution, RulesEngine};
use crate::selection::parse_selection;
use crate::world::ChamberId;

/// Test harness for running game scenarios.
///
/// Unlike [`HeadlessGame`](crate::headless::HeadlessGame) the harness keeps
/// its dice concrete, so tests can script every roll and check how many
/// were made.
pub struct TestHarness {
    /// The dungeon being played.
    pub dungeon: Dungeon,
    /// Dice for every fight.
    pub dice: LoadedDice,
    rules: RulesEngine,
    transcript: Vec<Resolution>,
}

impl TestHarness {
    /// The standard dungeon with a wizard named "Test Hero". Every roll is 1
    /// until [`load_dice`](Self::load_dice) says otherwise.
    pub fn new() -> Self {
        Self::with_character(Character::wizard("Test Hero"))
    }

    /// The standard dungeon with a custom player.
    pub fn with_character(character: Character) -> Self {
        match create_standard_dungeon(character) {
            Ok(dungeon) => Self::with_dungeon(dungeon),
            Err(err) => panic!("standard dungeon failed to build: {err}"),
        }
    }

    /// Any dungeon.
    pub fn with_dungeon(dungeon: Dungeon) -> Self {
        Self {
            dungeon,
            dice: LoadedDice::constant(1),
            rules: RulesEngine::new(),
            transcript: Vec::new(),
        }
    }

    /// Replace the dice with a script that repeats forever.
    pub fn load_dice(&mut self, script: impl IntoIterator<Item = u32>) -> &mut Self {
        self.dice = LoadedDice::cycle(script);
        self
    }

    /// Handle one line of input the way a player at the prompt would.
    pub fn input(&mut self, text: &str) -> Resolution {
        let actions = self.dungeon.actions();
        let action = match parse_selection(text, actions.len()) {
            Ok(index) => actions[index].clone(),
            Err(err) => Action::error(err),
        };
        self.act(&action)
    }

    /// Execute an action directly.
    pub fn act(&mut self, action: &Action) -> Resolution {
        let resolution = self.rules.execute(&mut self.dungeon, action, &mut self.dice);
        self.transcript.push(resolution.clone());
        resolution
    }

    /// Feed several lines of input in order.
    pub fn run_script(&mut self, inputs: &[&str]) -> Vec<Resolution> {
        inputs.iter().map(|input| self.input(input)).collect()
    }

    /// Execute the first action whose label contains `needle`.
    ///
    /// Panics if no option matches, listing the options that were there.
    #[track_caller]
    pub fn choose_labelled(&mut self, needle: &str) -> Resolution {
        let labels = self.option_labels();
        let Some(index) = labels.iter().position(|label| label.contains(needle)) else {
            panic!("no option matching '{needle}' in {labels:?}");
        };
        let action = self.dungeon.actions()[index].clone();
        self.act(&action)
    }

    /// Labels of the current options, in order.
    pub fn option_labels(&self) -> Vec<String> {
        self.dungeon
            .actions()
            .iter()
            .map(|action| action.describe(&self.dungeon))
            .collect()
    }

    pub fn player(&self) -> &Character {
        self.dungeon.player()
    }

    pub fn player_health(&self) -> i32 {
        self.dungeon.player().health()
    }

    pub fn current_chamber(&self) -> ChamberId {
        self.dungeon.current_chamber()
    }

    /// Number of doors that still have a living guardian.
    pub fn locked_doors(&self) -> usize {
        self.dungeon
            .graph()
            .doors()
            .iter()
            .filter(|door| door.is_locked())
            .count()
    }

    /// Every resolution so far, oldest first.
    pub fn transcript(&self) -> &[Resolution] {
        &self.transcript
    }

    pub fn last_narrative(&self) -> Option<&str> {
        self.transcript.last().map(|r| r.narrative.as_str())
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the player is standing in chamber `index`.
#[track_caller]
pub fn assert_in_chamber(harness: &TestHarness, index: usize) {
    let actual = harness.current_chamber().index();
    assert_eq!(actual, index, "Expected to be in chamber {index}, got {actual}");
}

/// Assert player health.
#[track_caller]
pub fn assert_health(harness: &TestHarness, health: i32) {
    let actual = harness.player_health();
    assert_eq!(actual, health, "Expected health {health}, got {actual}");
}

/// Assert the game is over with the given outcome.
#[track_caller]
pub fn assert_outcome(harness: &TestHarness, outcome: Outcome) {
    assert!(harness.dungeon.is_finished(), "Expected the game to be over");
    assert_eq!(harness.dungeon.outcome(), Some(outcome));
}

/// Assert the game is still running.
#[track_caller]
pub fn assert_running(harness: &TestHarness) {
    assert!(
        !harness.dungeon.is_finished(),
        "Expected the game to still be running, got {:?}",
        harness.dungeon.outcome()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_starts_at_entrance() {
        let harness = TestHarness::new();
        assert_in_chamber(&harness, 0);
        assert_health(&harness, 15);
        assert_running(&harness);
        assert_eq!(harness.locked_doors(), 2);
        assert!(harness.transcript().is_empty());
    }

    #[test]
    fn test_harness_input_records_transcript() {
        let mut harness = TestHarness::new();
        harness.input("0");
        harness.input("nope");

        assert_in_chamber(&harness, 1);
        assert_eq!(harness.transcript().len(), 2);
        assert!(harness
            .last_narrative()
            .unwrap()
            .starts_with("Error: Please enter a valid number"));
    }

    #[test]
    fn test_choose_labelled() {
        let mut harness = TestHarness::new();
        harness.choose_labelled("Move");
        let resolution = harness.choose_labelled("Pick up Axe");

        assert!(resolution.narrative.contains("left hand"));
        assert_eq!(harness.player().total_strength(), 5);
    }

    #[test]
    #[should_panic(expected = "no option matching")]
    fn test_choose_labelled_panics_without_match() {
        let mut harness = TestHarness::new();
        harness.choose_labelled("Fight");
    }

    #[test]
    fn test_load_dice() {
        let mut harness = TestHarness::new();
        harness.load_dice([6, 1]);
        harness.run_script(&["0", "1"]);

        // Wizard 2 + 6 = 8 against Goblin 1 + 1 = 2
        assert_eq!(harness.locked_doors(), 1);
        assert_eq!(harness.dice.rolls_made(), 2);
    }
}
