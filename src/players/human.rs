//! Human player fed by a UI-owned channel.

use super::Player;
use crate::game::{Game, Position};
use anyhow::Result;
use tokio::sync::mpsc;
use tracing::debug;

/// Human player whose moves arrive over a channel.
///
/// The UI collaborator owns the sending half: it parses whatever
/// input surface it has (keys, clicks, lines) into positions and
/// forwards them here. Legality is not checked at this seam; the
/// session rejects illegal moves and the UI sees the rejection.
pub struct HumanPlayer {
    name: String,
    input_rx: mpsc::UnboundedReceiver<Position>,
}

impl HumanPlayer {
    /// Creates a new human player reading from the given channel.
    pub fn new(name: impl Into<String>, input_rx: mpsc::UnboundedReceiver<Position>) -> Self {
        Self {
            name: name.into(),
            input_rx,
        }
    }
}

#[async_trait::async_trait]
impl Player for HumanPlayer {
    async fn get_move(&mut self, _game: &Game) -> Result<Position> {
        match self.input_rx.recv().await {
            Some(position) => {
                debug!(player = %self.name, %position, "received move");
                Ok(position)
            }
            None => anyhow::bail!("Input channel closed"),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
