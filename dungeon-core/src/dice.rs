//! Dice for combat rounds.
//!
//! Rules code never reaches for an ambient generator. Every roll goes through
//! a [`DiceSource`] supplied by the caller, so a game can be replayed from a
//! seed and tests can load the dice.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single die with a fixed number of faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Die {
    sides: u32,
}

impl Die {
    /// The six-sided die used for every combat roll.
    pub const D6: Die = Die { sides: 6 };

    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Force `value` onto a face of this die.
    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(1, self.sides)
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides)
    }
}

/// Anything that can produce die rolls.
pub trait DiceSource {
    /// Roll one die, returning a value in `1..=die.sides()`.
    fn roll(&mut self, die: Die) -> u32;
}

/// Fair dice backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomDice<R = StdRng> {
    rng: R,
}

impl<R: Rng> RandomDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomDice<StdRng> {
    /// Reproducible dice: the same seed yields the same sequence of rolls.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Dice seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> DiceSource for RandomDice<R> {
    fn roll(&mut self, die: Die) -> u32 {
        self.rng.gen_range(1..=die.sides())
    }
}

/// Dice that replay a fixed script of results.
///
/// Each scripted value is clamped onto the rolled die. Once a non-cycling
/// script runs out every further roll comes up 1.
#[derive(Debug, Clone)]
pub struct LoadedDice {
    script: Vec<u32>,
    next: usize,
    cycle: bool,
}

impl LoadedDice {
    /// Replay `script` once.
    pub fn new(script: impl IntoIterator<Item = u32>) -> Self {
        Self {
            script: script.into_iter().collect(),
            next: 0,
            cycle: false,
        }
    }

    /// Replay `script` forever.
    pub fn cycle(script: impl IntoIterator<Item = u32>) -> Self {
        Self {
            cycle: true,
            ..Self::new(script)
        }
    }

    /// Every roll comes up `value`.
    pub fn constant(value: u32) -> Self {
        Self::cycle([value])
    }

    /// Number of rolls made so far.
    pub fn rolls_made(&self) -> usize {
        self.next
    }
}

impl DiceSource for LoadedDice {
    fn roll(&mut self, die: Die) -> u32 {
        let value = if self.script.is_empty() {
            None
        } else if self.cycle {
            Some(self.script[self.next % self.script.len()])
        } else {
            self.script.get(self.next).copied()
        };
        self.next += 1;

        match value {
            Some(v) => die.clamp(v),
            None => {
                tracing::warn!(roll = self.next, "loaded dice exhausted, rolling 1");
                1
            }
        }
    }
}
