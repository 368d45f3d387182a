//! Match session: mode, named seats, score, and the active game.
//!
//! A [`Session`] is created at mode selection and is the sole
//! authority for legal move application, result detection, score
//! bookkeeping and computer-move generation. It owns no I/O: callers
//! observe the returned results and the [`Snapshot`] after each
//! transition and decide what to present.

use crate::game::{Game, Mark, Move, MoveError, Outcome, Position, Square};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// How the O seat is filled.
///
/// There is no unset variant: a session only exists once a mode has
/// been chosen, so "no mode yet" is the absence of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// X is human, O is the random computer opponent.
    #[display("single-player")]
    SinglePlayer,
    /// Both seats take externally supplied moves.
    #[display("multiplayer")]
    Multiplayer,
}

/// What produces moves for a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatKind {
    /// Moves arrive from outside (a UI collaborator).
    Human,
    /// Moves are generated by [`Session::computer_move`].
    Computer,
}

/// A named seat bound to a mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// Display name.
    pub name: String,
    /// What produces this seat's moves.
    pub kind: SeatKind,
}

/// Cumulative wins per mark.
///
/// Monotonically non-decreasing within a mode session; zeroed exactly
/// when the mode changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Wins by X.
    pub x: u32,
    /// Wins by O.
    pub o: u32,
}

impl Score {
    /// Returns the win count for a mark.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    fn record_win(&mut self, mark: Mark) {
        match mark {
            Mark::X => self.x += 1,
            Mark::O => self.o += 1,
        }
    }
}

/// A serializable view of the full session state, published to UIs
/// after every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// The board contents.
    pub board: crate::game::Board,
    /// The mark whose turn it is.
    pub to_move: Mark,
    /// The active mode.
    pub mode: Mode,
    /// The X seat.
    pub seat_x: Seat,
    /// The O seat.
    pub seat_o: Seat,
    /// Cumulative score.
    pub score: Score,
    /// Terminal outcome of the current game, if any.
    pub outcome: Option<Outcome>,
}

/// A match session with two seats.
#[derive(Debug, Clone)]
pub struct Session {
    mode: Mode,
    seat_x: Seat,
    seat_o: Seat,
    score: Score,
    game: Game,
    generation: u64,
}

impl Session {
    /// Creates a session for the given mode: empty board, X to move,
    /// score zeroed. In single-player mode O is bound to the computer.
    #[instrument(skip(name_x, name_o))]
    pub fn new(mode: Mode, name_x: impl Into<String>, name_o: impl Into<String>) -> Self {
        let seat_x = Seat {
            name: name_x.into(),
            kind: SeatKind::Human,
        };
        let seat_o = Seat {
            name: name_o.into(),
            kind: match mode {
                Mode::SinglePlayer => SeatKind::Computer,
                Mode::Multiplayer => SeatKind::Human,
            },
        };
        info!(%mode, x = %seat_x.name, o = %seat_o.name, "creating session");

        Self {
            mode,
            seat_x,
            seat_o,
            score: Score::default(),
            game: Game::new(),
            generation: 0,
        }
    }

    /// Returns the active mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the current game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the seat bound to a mark.
    pub fn seat(&self, mark: Mark) -> &Seat {
        match mark {
            Mark::X => &self.seat_x,
            Mark::O => &self.seat_o,
        }
    }

    /// Returns the display name bound to a mark.
    pub fn name_of(&self, mark: Mark) -> &str {
        &self.seat(mark).name
    }

    /// Returns the cumulative score.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Returns the mark whose turn it is.
    pub fn to_move(&self) -> Mark {
        self.game.to_move()
    }

    /// Returns the terminal outcome of the current game, if any.
    pub fn outcome(&self) -> Option<Outcome> {
        self.game.outcome().copied()
    }

    /// Returns true if the current game has a terminal outcome.
    pub fn is_terminal(&self) -> bool {
        self.game.is_over()
    }

    /// Bumped on every restart or mode change. A caller that scheduled
    /// a delayed action can compare generations to detect that the
    /// state it captured has been superseded.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the square at a board index.
    ///
    /// # Errors
    ///
    /// [`MoveError::OutOfRange`] when `index` is not in 0-8.
    pub fn cell_at(&self, index: usize) -> Result<Square, MoveError> {
        Position::from_index(index)
            .map(|pos| self.game.board().get(pos))
            .ok_or(MoveError::OutOfRange(index))
    }

    /// Applies a move at a board index for the mark whose turn it is.
    ///
    /// On a winning move the winner's score is incremented by exactly
    /// one. Any rejection leaves the session unchanged.
    #[instrument(skip(self))]
    pub fn play(&mut self, index: usize) -> Result<Position, MoveError> {
        let position = Position::from_index(index).ok_or(MoveError::OutOfRange(index))?;
        self.apply(position)
    }

    /// Plays the computer's turn: a uniformly random pick among the
    /// empty squares. Deliberately non-strategic.
    ///
    /// Returns the chosen position, or `Ok(None)` if no empty square
    /// remains (a full board is normally already terminal, so this is
    /// a defensive no-op).
    ///
    /// # Errors
    ///
    /// - [`MoveError::NoComputerSeat`] outside single-player mode.
    /// - [`MoveError::GameOver`] if the game already has an outcome.
    /// - [`MoveError::WrongPlayer`] if it is not O's turn.
    #[instrument(skip(self, rng))]
    pub fn computer_move<R: Rng>(&mut self, rng: &mut R) -> Result<Option<Position>, MoveError> {
        if self.mode != Mode::SinglePlayer {
            return Err(MoveError::NoComputerSeat);
        }
        if self.game.is_over() {
            return Err(MoveError::GameOver);
        }
        if self.game.to_move() != Mark::O {
            return Err(MoveError::WrongPlayer(Mark::O));
        }

        let open = self.game.valid_moves();
        let Some(position) = open.choose(rng).copied() else {
            warn!("computer move requested with no empty squares");
            return Ok(None);
        };

        self.apply(position)?;
        Ok(Some(position))
    }

    /// Starts the next game of the match: clears board and outcome,
    /// X moves first. Mode, names and score are preserved.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        self.game.reset();
        self.generation += 1;
        info!(generation = self.generation, "session restarted");
    }

    /// Discards the match and starts over in a new mode with fresh
    /// names and a zeroed score.
    #[instrument(skip(self, name_x, name_o))]
    pub fn change_mode(
        &mut self,
        mode: Mode,
        name_x: impl Into<String>,
        name_o: impl Into<String>,
    ) {
        let generation = self.generation + 1;
        *self = Session::new(mode, name_x, name_o);
        self.generation = generation;
        info!(%mode, generation, "mode changed");
    }

    /// Returns the full state view for UIs.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.game.board().clone(),
            to_move: self.game.to_move(),
            mode: self.mode,
            seat_x: self.seat_x.clone(),
            seat_o: self.seat_o.clone(),
            score: self.score,
            outcome: self.outcome(),
        }
    }

    fn apply(&mut self, position: Position) -> Result<Position, MoveError> {
        let action = Move::new(self.game.to_move(), position);
        self.game.make_move(action)?;

        if let Some(Outcome::Winner(winner)) = self.game.outcome().copied() {
            self.score.record_win(winner);
            info!(
                winner = %winner,
                name = %self.name_of(winner),
                score_x = self.score.x,
                score_o = self.score.o,
                "game won"
            );
        } else {
            debug!(%action, outcome = ?self.game.outcome(), "move applied");
        }

        Ok(position)
    }
}
