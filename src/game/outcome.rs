//! Terminal outcomes of a game.

use super::types::Mark;
use serde::{Deserialize, Serialize};

/// Outcome of a finished game.
///
/// Terminal and immutable: once a game carries an outcome, no further
/// moves are accepted until the board is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A mark completed a line and won the game.
    Winner(Mark),
    /// The board filled with no winning line.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Winner(mark) => Some(*mark),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(mark) => write!(f, "{} wins", mark),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
