//! Command-line interface for the tic-tac-toe binary.

use clap::{Parser, ValueEnum};
use tictactoe_engine::Mode;

/// Tic-tac-toe in the terminal: human vs human, or human vs a random
/// computer opponent.
#[derive(Parser, Debug)]
#[command(name = "tictactoe_engine")]
#[command(about = "Play tic-tac-toe against a friend or the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Game mode
    #[arg(long, value_enum, default_value_t = GameMode::Single)]
    pub mode: GameMode,

    /// Display name for the X player
    #[arg(long, default_value = "Player X")]
    pub name_x: String,

    /// Display name for the O player (defaults to "Computer" in
    /// single mode, "Player O" in multi mode)
    #[arg(long)]
    pub name_o: Option<String>,

    /// Seed for the computer opponent (deterministic play)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Delay in milliseconds before the computer moves (cosmetic)
    #[arg(long, default_value_t = 500)]
    pub pace_ms: u64,

    /// Emit events as JSON lines instead of a text board
    #[arg(long)]
    pub json: bool,
}

/// Game mode flag.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Human X against the random computer O.
    Single,
    /// Two humans sharing the terminal.
    Multi,
}

impl From<GameMode> for Mode {
    fn from(mode: GameMode) -> Self {
        match mode {
            GameMode::Single => Mode::SinglePlayer,
            GameMode::Multi => Mode::Multiplayer,
        }
    }
}

impl Cli {
    /// Resolves the O seat name, falling back per mode.
    pub fn resolved_name_o(&self) -> String {
        match &self.name_o {
            Some(name) => name.clone(),
            None => match self.mode {
                GameMode::Single => "Computer".to_string(),
                GameMode::Multi => "Player O".to_string(),
            },
        }
    }
}
