//! Error types for world construction and player input.

use crate::world::ChamberId;
use thiserror::Error;

/// Errors raised while wiring up the chamber graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("No such chamber: {0}")]
    UnknownChamber(ChamberId),

    #[error("A door cannot lead from {0} back into itself")]
    SelfLoop(ChamberId),
}

/// Why a line of player input could not be turned into an action index.
///
/// The messages are shown to the player verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Please enter a valid number")]
    NotANumber { input: String },

    #[error("Invalid choice. Please enter a number between 0 and {max}")]
    OutOfRange { choice: i64, max: usize },

    #[error("There is nothing you can do here")]
    NoActions,
}
