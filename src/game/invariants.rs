//! First-class invariants for game state.
//!
//! Invariants are logical properties that must hold throughout a
//! game. They are testable independently and are asserted after every
//! accepted move in debug builds.

use super::engine::Game;
use super::types::{Board, Mark, Square};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

/// Invariant: marks alternate turns.
///
/// Move history must show X, O, X, O, ... and, while the game is in
/// progress, the mark to move must match the history parity.
pub struct AlternatingTurnInvariant;

impl Invariant<Game> for AlternatingTurnInvariant {
    fn holds(game: &Game) -> bool {
        let history = game.history();

        if let Some(first) = history.first()
            && first.player != Mark::X
        {
            return false;
        }

        for window in history.windows(2) {
            if window[0].player == window[1].player {
                return false;
            }
        }

        if game.is_over() {
            return true;
        }

        let expected_next = if history.len() % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        };
        game.to_move() == expected_next
    }

    fn description() -> &'static str {
        "Marks alternate turns (X, O, X, O, ...)"
    }
}

/// Invariant: board squares are monotonic (never overwritten).
///
/// Replaying the move history onto an empty board must reproduce the
/// current board exactly.
pub struct MonotonicBoardInvariant;

impl Invariant<Game> for MonotonicBoardInvariant {
    fn holds(game: &Game) -> bool {
        let mut reconstructed = Board::new();

        for mov in game.history() {
            if !reconstructed.is_empty(mov.position) {
                return false;
            }
            reconstructed.set(mov.position, Square::Occupied(mov.player));
        }

        reconstructed == *game.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}

/// Invariant: history length equals the number of occupied squares.
pub struct HistoryConsistentInvariant;

impl Invariant<Game> for HistoryConsistentInvariant {
    fn holds(game: &Game) -> bool {
        let occupied = game
            .board()
            .squares()
            .iter()
            .filter(|s| **s != Square::Empty)
            .count();

        game.history().len() == occupied
    }

    fn description() -> &'static str {
        "History length matches number of occupied squares"
    }
}

/// Checks every game invariant, collecting violations.
pub fn check_all(game: &Game) -> Result<(), Vec<InvariantViolation>> {
    let mut violations = Vec::new();

    if !AlternatingTurnInvariant::holds(game) {
        violations.push(InvariantViolation {
            description: AlternatingTurnInvariant::description().to_string(),
        });
    }
    if !MonotonicBoardInvariant::holds(game) {
        violations.push(InvariantViolation {
            description: MonotonicBoardInvariant::description().to_string(),
        });
    }
    if !HistoryConsistentInvariant::holds(game) {
        violations.push(InvariantViolation {
            description: HistoryConsistentInvariant::description().to_string(),
        });
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Asserts all game invariants (debug builds only).
pub fn assert_invariants(game: &Game) {
    debug_assert!(
        check_all(game).is_ok(),
        "game invariant violated: {:?}",
        check_all(game)
    );
}

#[cfg(test)]
mod tests {
    use super::super::action::Move;
    use super::super::position::Position;
    use super::*;

    fn game_after(positions: &[Position]) -> Game {
        let mut game = Game::new();
        for &pos in positions {
            let mark = game.to_move();
            game.make_move(Move::new(mark, pos)).expect("legal move");
        }
        game
    }

    #[test]
    fn test_all_hold_for_new_game() {
        let game = Game::new();
        assert!(check_all(&game).is_ok());
    }

    #[test]
    fn test_all_hold_after_moves() {
        let game = game_after(&[
            Position::TopLeft,
            Position::Center,
            Position::TopRight,
            Position::BottomLeft,
        ]);
        assert!(check_all(&game).is_ok());
    }

    #[test]
    fn test_all_hold_after_win() {
        let game = game_after(&[
            Position::TopLeft,
            Position::Center,
            Position::TopCenter,
            Position::BottomLeft,
            Position::TopRight,
        ]);
        assert!(game.is_over());
        assert!(check_all(&game).is_ok());
    }

    #[test]
    fn test_empty_history_alternation_holds() {
        let game = Game::new();
        assert!(AlternatingTurnInvariant::holds(&game));
        assert!(MonotonicBoardInvariant::holds(&game));
        assert!(HistoryConsistentInvariant::holds(&game));
    }
}
