//! Move sources for human-controlled seats.

mod human;

pub use human::HumanPlayer;

use crate::game::{Game, Position};
use anyhow::Result;

/// Trait for seats whose moves are supplied from outside the engine.
///
/// The computer opponent is not a `Player`: its moves come from the
/// session's own computer-move path.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Gets the next move from this player.
    async fn get_move(&mut self, game: &Game) -> Result<Position>;

    /// Returns the player's display name.
    fn name(&self) -> &str;
}
