//! Tic-tac-toe match engine.
//!
//! # Architecture
//!
//! - **game**: the pure core - board, marks, win/draw rules and turn
//!   resolution. Synchronous, allocation-light, no I/O.
//! - **session**: the full match state - mode, named seats, cumulative
//!   score - and the operations a UI drives: play a move, run the
//!   computer's turn, restart, change mode.
//! - **players**: the seam where external UIs feed human moves in.
//! - **driver**: async orchestration turning a session into an event
//!   stream for a UI collaborator.
//!
//! Rendering, sound and any other presentation belongs to the
//! consumer of the event stream; the engine only ever returns state.
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{Mark, Mode, Outcome, Session};
//!
//! let mut session = Session::new(Mode::Multiplayer, "Ann", "Ben");
//! for index in [0, 4, 1, 5, 2] {
//!     session.play(index)?;
//! }
//! assert_eq!(session.outcome(), Some(Outcome::Winner(Mark::X)));
//! assert_eq!(session.score().wins(Mark::X), 1);
//! # Ok::<(), tictactoe_engine::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod driver;
mod game;
mod players;
mod session;

// Crate-level exports - game core
pub use game::{Board, Game, Mark, Move, MoveError, Outcome, Position, Square};

// Crate-level exports - rules and invariants (pure functions over boards/games)
pub use game::{invariants, rules};

// Crate-level exports - session
pub use session::{Mode, Score, Seat, SeatKind, Session, Snapshot};

// Crate-level exports - players
pub use players::{HumanPlayer, Player};

// Crate-level exports - driver
pub use driver::{Control, Driver, GameEvent};
