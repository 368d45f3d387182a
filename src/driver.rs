//! Match orchestration between seats and a UI collaborator.
//!
//! The driver owns the [`Session`] and turns it into an event stream:
//! it queries players for moves, runs the computer's turn with an
//! optional pacing delay, and publishes a [`GameEvent`] after every
//! transition. UI requests arrive on a [`Control`] channel and are
//! raced against pending input, so a restart or mode change always
//! supersedes a move that has not been applied yet. The pacing delay
//! is presentation only; a zero pace is just as correct.

use crate::game::{Mark, Outcome, Position};
use crate::players::Player;
use crate::session::{Mode, Score, SeatKind, Session, Snapshot};
use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Messages sent from the driver to the UI.
#[derive(Debug, Clone, Serialize)]
pub enum GameEvent {
    /// Full state view after a transition.
    State(Snapshot),
    /// A move was applied.
    MoveMade {
        /// Display name of the mover.
        name: String,
        /// The mover's mark.
        mark: Mark,
        /// Where the mark was placed.
        position: Position,
    },
    /// The computer seat is about to move.
    Thinking {
        /// Display name of the computer seat.
        name: String,
    },
    /// A move was rejected; the state is unchanged.
    MoveRejected {
        /// Why the move was rejected.
        reason: String,
    },
    /// The current game reached a terminal outcome.
    GameOver {
        /// The outcome.
        outcome: Outcome,
        /// Cumulative score including this game.
        score: Score,
    },
    /// The match was restarted (score preserved).
    MatchReset,
    /// The mode was changed (score discarded).
    ModeChanged {
        /// The new mode.
        mode: Mode,
    },
}

/// Requests sent from the UI to the driver.
#[derive(Debug, Clone)]
pub enum Control {
    /// Start the next game, preserving the score.
    Restart,
    /// Discard the match and start over in a new mode.
    ChangeMode {
        /// The new mode.
        mode: Mode,
        /// Name for the X seat.
        name_x: String,
        /// Name for the O seat.
        name_o: String,
    },
    /// End the match.
    Quit,
}

/// Orchestrates a match between two seats.
pub struct Driver {
    session: Session,
    player_x: Box<dyn Player>,
    player_o: Option<Box<dyn Player>>,
    rng: SmallRng,
    pace: Duration,
    events: mpsc::UnboundedSender<GameEvent>,
    control: mpsc::UnboundedReceiver<Control>,
}

impl Driver {
    /// Creates a new driver.
    ///
    /// `player_o` may be `None` only when the session starts in
    /// single-player mode (the O seat is the computer). A later mode
    /// change to multiplayer requires a seated O player.
    ///
    /// `seed` makes the computer opponent deterministic; without it
    /// the generator is seeded from entropy.
    pub fn new(
        session: Session,
        player_x: Box<dyn Player>,
        player_o: Option<Box<dyn Player>>,
        seed: Option<u64>,
        pace: Duration,
        events: mpsc::UnboundedSender<GameEvent>,
        control: mpsc::UnboundedReceiver<Control>,
    ) -> Result<Self> {
        if session.mode() == Mode::Multiplayer && player_o.is_none() {
            anyhow::bail!("multiplayer requires a player seated at O");
        }

        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        Ok(Self {
            session,
            player_x,
            player_o,
            rng,
            pace,
            events,
            control,
        })
    }

    /// Runs the match until the UI quits or its channels close.
    pub async fn run(mut self) -> Result<()> {
        info!(mode = %self.session.mode(), "starting match");
        self.events.send(GameEvent::State(self.session.snapshot()))?;

        loop {
            if self.session.is_terminal() {
                let outcome = self
                    .session
                    .outcome()
                    .context("terminal game without outcome")?;
                self.events.send(GameEvent::GameOver {
                    outcome,
                    score: self.session.score(),
                })?;

                let ctrl = self.control.recv().await;
                if !handle_control(&mut self.session, &self.events, ctrl)? {
                    return Ok(());
                }
                continue;
            }

            let mark = self.session.to_move();
            let keep_going = match self.session.seat(mark).kind {
                SeatKind::Computer => self.computer_turn().await?,
                SeatKind::Human => self.human_turn(mark).await?,
            };
            if !keep_going {
                info!("match ended");
                return Ok(());
            }
        }
    }

    /// Runs the computer's turn: pacing delay, then a random move.
    ///
    /// A control message that arrives during the delay wins; the
    /// delayed move is then dropped (the session re-validates its
    /// preconditions, so a superseded move can never corrupt state).
    async fn computer_turn(&mut self) -> Result<bool> {
        self.events.send(GameEvent::Thinking {
            name: self.session.name_of(Mark::O).to_string(),
        })?;

        let session = &mut self.session;
        let events = &self.events;
        let control = &mut self.control;
        let rng = &mut self.rng;
        let pace = self.pace;

        tokio::select! {
            ctrl = control.recv() => handle_control(session, events, ctrl),
            _ = sleep(pace) => {
                match session.computer_move(rng) {
                    Ok(Some(position)) => {
                        events.send(GameEvent::MoveMade {
                            name: session.name_of(Mark::O).to_string(),
                            mark: Mark::O,
                            position,
                        })?;
                        events.send(GameEvent::State(session.snapshot()))?;
                        Ok(true)
                    }
                    Ok(None) => Ok(true),
                    Err(e) => {
                        debug!(error = %e, "computer move superseded, skipping");
                        Ok(true)
                    }
                }
            }
        }
    }

    /// Waits for a human move, racing it against control messages.
    async fn human_turn(&mut self, mark: Mark) -> Result<bool> {
        let game = self.session.game().clone();
        let player = match mark {
            Mark::X => &mut self.player_x,
            Mark::O => self
                .player_o
                .as_mut()
                .context("no player seated at O")?,
        };
        let session = &mut self.session;
        let events = &self.events;
        let control = &mut self.control;

        tokio::select! {
            ctrl = control.recv() => handle_control(session, events, ctrl),
            mv = player.get_move(&game) => match mv {
                Ok(position) => {
                    match session.play(position.to_index()) {
                        Ok(position) => {
                            events.send(GameEvent::MoveMade {
                                name: session.name_of(mark).to_string(),
                                mark,
                                position,
                            })?;
                            events.send(GameEvent::State(session.snapshot()))?;
                        }
                        Err(e) => {
                            warn!(player = %session.name_of(mark), error = %e, "move rejected");
                            events.send(GameEvent::MoveRejected {
                                reason: e.to_string(),
                            })?;
                        }
                    }
                    Ok(true)
                }
                Err(e) => {
                    info!(error = %e, "input source closed, ending match");
                    Ok(false)
                }
            }
        }
    }
}

/// Applies a UI request to the session. Returns false when the match
/// should end.
fn handle_control(
    session: &mut Session,
    events: &mpsc::UnboundedSender<GameEvent>,
    ctrl: Option<Control>,
) -> Result<bool> {
    match ctrl {
        Some(Control::Restart) => {
            session.restart();
            events.send(GameEvent::MatchReset)?;
            events.send(GameEvent::State(session.snapshot()))?;
            Ok(true)
        }
        Some(Control::ChangeMode {
            mode,
            name_x,
            name_o,
        }) => {
            session.change_mode(mode, name_x, name_o);
            events.send(GameEvent::ModeChanged { mode })?;
            events.send(GameEvent::State(session.snapshot()))?;
            Ok(true)
        }
        Some(Control::Quit) | None => Ok(false),
    }
}
