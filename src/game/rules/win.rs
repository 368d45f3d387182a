//! Win detection logic for tic-tac-toe.

use super::super::position::Position;
use super::super::types::{Board, Mark, Square};
use tracing::instrument;

/// Checks if there is a winner on the board.
///
/// The 8 lines are checked in a fixed order: rows, columns, then
/// diagonals. At most one line can be complete in a well-formed game,
/// so the order has no observable effect, but the set is exact.
///
/// Returns `Some(mark)` if that mark has three in a row,
/// `None` otherwise.
#[instrument]
pub fn check_winner(board: &Board) -> Option<Mark> {
    const LINES: [[Position; 3]; 8] = [
        // Rows
        [Position::TopLeft, Position::TopCenter, Position::TopRight],
        [
            Position::MiddleLeft,
            Position::Center,
            Position::MiddleRight,
        ],
        [
            Position::BottomLeft,
            Position::BottomCenter,
            Position::BottomRight,
        ],
        // Columns
        [
            Position::TopLeft,
            Position::MiddleLeft,
            Position::BottomLeft,
        ],
        [
            Position::TopCenter,
            Position::Center,
            Position::BottomCenter,
        ],
        [
            Position::TopRight,
            Position::MiddleRight,
            Position::BottomRight,
        ],
        // Diagonals
        [Position::TopLeft, Position::Center, Position::BottomRight],
        [Position::TopRight, Position::Center, Position::BottomLeft],
    ];

    for [a, b, c] in LINES {
        let sq = board.get(a);
        if sq != Square::Empty && sq == board.get(b) && sq == board.get(c) {
            return match sq {
                Square::Occupied(mark) => Some(mark),
                Square::Empty => None,
            };
        }
    }

    None
}
