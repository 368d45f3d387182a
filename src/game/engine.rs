//! Turn resolution for a single game of tic-tac-toe.

use super::action::{Move, MoveError};
use super::invariants;
use super::outcome::Outcome;
use super::position::Position;
use super::rules;
use super::types::{Board, Mark, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A single game: board, whose turn it is, terminal outcome, history.
///
/// All transitions are synchronous and side-effect free. A rejected
/// move leaves the game untouched; a terminal game rejects every move
/// until [`Game::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    to_move: Mark,
    outcome: Option<Outcome>,
    history: Vec<Move>,
}

impl Game {
    /// Creates a new game with an empty board, X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Mark::X,
            outcome: None,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark whose turn it is.
    ///
    /// Once the game is over this stays at the mark that made the
    /// terminal move.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the terminal outcome, if the game has one.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Returns true if the game has reached a terminal outcome.
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the positions still open for play.
    pub fn valid_moves(&self) -> Vec<Position> {
        Position::valid_moves(&self.board)
    }

    /// Applies a move, validating it first.
    ///
    /// On a winning move the outcome is set and the turn is left
    /// unchanged; on a board-filling move the outcome is a draw;
    /// otherwise the turn flips to the opponent.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if the game already has an outcome.
    /// - [`MoveError::WrongPlayer`] if it is not the mover's turn.
    /// - [`MoveError::SquareOccupied`] if the square is taken.
    ///
    /// On any error the game is unchanged.
    #[instrument(skip(self), fields(position = ?action.position, player = ?action.player))]
    pub fn make_move(&mut self, action: Move) -> Result<(), MoveError> {
        if self.outcome.is_some() {
            return Err(MoveError::GameOver);
        }
        if action.player != self.to_move {
            return Err(MoveError::WrongPlayer(action.player));
        }
        if !self.board.is_empty(action.position) {
            return Err(MoveError::SquareOccupied(action.position));
        }

        self.board.set(action.position, Square::Occupied(action.player));
        self.history.push(action);

        if let Some(winner) = rules::check_winner(&self.board) {
            self.outcome = Some(Outcome::Winner(winner));
        } else if rules::is_full(&self.board) {
            self.outcome = Some(Outcome::Draw);
        } else {
            self.to_move = self.to_move.opponent();
        }

        invariants::assert_invariants(self);

        Ok(())
    }

    /// Clears the board, outcome and history; X moves first again.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Game::new();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(game: &mut Game, positions: &[Position]) {
        for &pos in positions {
            let mark = game.to_move();
            game.make_move(Move::new(mark, pos)).expect("legal move");
        }
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = Game::new();
        assert_eq!(game.to_move(), Mark::X);
        play(&mut game, &[Position::TopLeft]);
        assert_eq!(game.to_move(), Mark::O);
        play(&mut game, &[Position::Center]);
        assert_eq!(game.to_move(), Mark::X);
    }

    #[test]
    fn test_occupied_square_rejected_unchanged() {
        let mut game = Game::new();
        play(&mut game, &[Position::Center]);
        let before = game.clone();

        let result = game.make_move(Move::new(Mark::O, Position::Center));
        assert_eq!(
            result,
            Err(MoveError::SquareOccupied(Position::Center))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_wrong_player_rejected() {
        let mut game = Game::new();
        let result = game.make_move(Move::new(Mark::O, Position::Center));
        assert_eq!(result, Err(MoveError::WrongPlayer(Mark::O)));
        assert_eq!(game.history().len(), 0);
    }

    #[test]
    fn test_winning_move_sets_outcome_and_freezes_turn() {
        let mut game = Game::new();
        play(
            &mut game,
            &[
                Position::TopLeft,
                Position::Center,
                Position::TopCenter,
                Position::BottomLeft,
                Position::TopRight, // X completes the top row
            ],
        );

        assert_eq!(game.outcome(), Some(&Outcome::Winner(Mark::X)));
        assert_eq!(game.to_move(), Mark::X);
        assert!(game.is_over());
    }

    #[test]
    fn test_terminal_game_rejects_moves_unchanged() {
        let mut game = Game::new();
        play(
            &mut game,
            &[
                Position::TopLeft,
                Position::Center,
                Position::TopCenter,
                Position::BottomLeft,
                Position::TopRight,
            ],
        );
        let before = game.clone();

        let result = game.make_move(Move::new(Mark::O, Position::BottomRight));
        assert_eq!(result, Err(MoveError::GameOver));
        assert_eq!(game, before);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let mut game = Game::new();
        // X O X / X O O / O X X
        play(
            &mut game,
            &[
                Position::TopLeft,      // X
                Position::TopCenter,    // O
                Position::TopRight,     // X
                Position::Center,       // O
                Position::MiddleLeft,   // X
                Position::MiddleRight,  // O
                Position::BottomCenter, // X
                Position::BottomLeft,   // O
                Position::BottomRight,  // X
            ],
        );

        assert_eq!(game.outcome(), Some(&Outcome::Draw));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut game = Game::new();
        play(&mut game, &[Position::Center, Position::TopLeft]);
        game.reset();

        assert_eq!(game, Game::new());
    }
}
