//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They represent a
//! player's intent and can be validated independently of execution.

use super::position::Position;
use super::types::Mark;
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The mark making the move.
    pub player: Mark,
    /// The position where the mark is placed.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Mark, position: Position) -> Self {
        Self { player, position }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position.label())
    }
}

/// Error that can occur when validating or applying a move.
///
/// Every variant is recoverable: the state that rejected the move is
/// left unchanged, and the caller decides whether to surface the
/// rejection or ignore it.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The move index falls outside the board.
    #[display("Index {} is out of range (must be 0-8)", _0)]
    OutOfRange(usize),

    /// The square at the position is already occupied.
    #[display("Square {:?} is already occupied", _0)]
    SquareOccupied(Position),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// It's not this mark's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(Mark),

    /// No computer opponent is seated in the current mode.
    #[display("No computer opponent is seated in this mode")]
    NoComputerSeat,
}

impl std::error::Error for MoveError {}
