//! Board positions and position parsing.

use super::types::Board;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A position on the tic-tac-toe board.
///
/// Position `i` maps to row `i / 3`, column `i % 3` of the grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Position {
    /// Top-left (index 0)
    TopLeft,
    /// Top-center (index 1)
    TopCenter,
    /// Top-right (index 2)
    TopRight,
    /// Middle-left (index 3)
    MiddleLeft,
    /// Center (index 4)
    Center,
    /// Middle-right (index 5)
    MiddleRight,
    /// Bottom-left (index 6)
    BottomLeft,
    /// Bottom-center (index 7)
    BottomCenter,
    /// Bottom-right (index 8)
    BottomRight,
}

impl Position {
    /// Get label for this position (for display).
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Parse from label or number (0-8).
    #[instrument]
    pub fn from_label_or_number(s: &str) -> Option<Position> {
        // Try as number first (position index 0-8)
        if let Ok(num) = s.trim().parse::<usize>() {
            return Self::from_index(num);
        }

        // Try as label (case-insensitive, partial match)
        let s_lower = s.to_lowercase();
        <Position as strum::IntoEnumIterator>::iter().find(|pos| {
            let label = pos.label().to_lowercase();
            label.contains(&s_lower) || s_lower.contains(&label)
        })
    }

    /// Converts position to board index (0-8).
    pub fn to_index(self) -> usize {
        match self {
            Position::TopLeft => 0,
            Position::TopCenter => 1,
            Position::TopRight => 2,
            Position::MiddleLeft => 3,
            Position::Center => 4,
            Position::MiddleRight => 5,
            Position::BottomLeft => 6,
            Position::BottomCenter => 7,
            Position::BottomRight => 8,
        }
    }

    /// Creates position from board index.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Position::TopLeft),
            1 => Some(Position::TopCenter),
            2 => Some(Position::TopRight),
            3 => Some(Position::MiddleLeft),
            4 => Some(Position::Center),
            5 => Some(Position::MiddleRight),
            6 => Some(Position::BottomLeft),
            7 => Some(Position::BottomCenter),
            8 => Some(Position::BottomRight),
            _ => None,
        }
    }

    /// All 9 positions.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Filters positions by board state - returns only empty squares.
    #[instrument(skip(board))]
    pub fn valid_moves(board: &Board) -> Vec<Position> {
        Self::ALL
            .iter()
            .copied()
            .filter(|pos| board.is_empty(*pos))
            .collect()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for (i, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.to_index(), i);
            assert_eq!(Position::from_index(i), Some(*pos));
        }
    }

    #[test]
    fn test_from_index_out_of_range() {
        assert_eq!(Position::from_index(9), None);
        assert_eq!(Position::from_index(100), None);
    }

    #[test]
    fn test_parse_number_and_label() {
        assert_eq!(Position::from_label_or_number("4"), Some(Position::Center));
        assert_eq!(
            Position::from_label_or_number("center"),
            Some(Position::Center)
        );
        assert_eq!(
            Position::from_label_or_number("Top-left"),
            Some(Position::TopLeft)
        );
        assert_eq!(Position::from_label_or_number("nowhere"), None);
    }

    #[test]
    fn test_valid_moves_excludes_occupied() {
        use super::super::types::{Mark, Square};

        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Mark::X));
        let moves = Position::valid_moves(&board);
        assert_eq!(moves.len(), 8);
        assert!(!moves.contains(&Position::Center));
    }
}
