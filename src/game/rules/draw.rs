//! Draw detection logic for tic-tac-toe.

use super::super::types::{Board, Square};
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
///
/// A full board with no winner indicates a draw.
#[instrument]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

#[cfg(test)]
mod tests {
    use super::super::super::position::Position;
    use super::super::super::types::Mark;
    use super::super::win::check_winner;
    use super::*;

    fn is_draw(board: &Board) -> bool {
        is_full(board) && check_winner(board).is_none()
    }

    #[test]
    fn test_empty_board_not_full() {
        let board = Board::new();
        assert!(!is_full(&board));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Mark::X));
        assert!(!is_full(&board));
    }

    #[test]
    fn test_draw_detection() {
        // X O X / O X O / O X O - full with no line
        let marks = [
            Mark::X,
            Mark::O,
            Mark::X,
            Mark::O,
            Mark::X,
            Mark::O,
            Mark::O,
            Mark::X,
            Mark::O,
        ];
        let mut board = Board::new();
        for (pos, mark) in Position::ALL.iter().zip(marks) {
            board.set(*pos, Square::Occupied(mark));
        }

        assert!(is_draw(&board));
    }

    #[test]
    fn test_not_draw_if_winner() {
        let mut board = Board::new();
        // X wins top row
        board.set(Position::TopLeft, Square::Occupied(Mark::X));
        board.set(Position::TopCenter, Square::Occupied(Mark::X));
        board.set(Position::TopRight, Square::Occupied(Mark::X));
        board.set(Position::MiddleLeft, Square::Occupied(Mark::O));
        board.set(Position::Center, Square::Occupied(Mark::O));

        assert!(!is_draw(&board));
    }
}
