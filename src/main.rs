//! Tic-tac-toe in the terminal.
//!
//! A line-oriented front end over the match engine: type a square
//! (1-9 as shown on the board, or a label like "center"), `r` to
//! restart, `m` to switch mode, `q` to quit. All presentation lives
//! here; the engine only returns state.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use std::io::BufRead;
use std::time::Duration;
use tictactoe_engine::{
    Control, Driver, GameEvent, HumanPlayer, Mark, Mode, Player, Position, SeatKind, Session,
    Snapshot,
};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (RUST_LOG etc.)
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout belongs to the board.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mode = Mode::from(cli.mode);
    let name_o = cli.resolved_name_o();

    info!(%mode, "starting tic-tac-toe");

    let session = Session::new(mode, cli.name_x.clone(), name_o.clone());

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (control_tx, control_rx) = mpsc::unbounded_channel();
    let (x_tx, x_rx) = mpsc::unbounded_channel();
    let (o_tx, o_rx) = mpsc::unbounded_channel();

    let player_x: Box<dyn Player> = Box::new(HumanPlayer::new(cli.name_x.clone(), x_rx));
    let player_o: Box<dyn Player> = Box::new(HumanPlayer::new(name_o, o_rx));

    let driver = Driver::new(
        session,
        player_x,
        Some(player_o),
        cli.seed,
        Duration::from_millis(cli.pace_ms),
        event_tx,
        control_rx,
    )?;
    let driver_task = tokio::spawn(driver.run());

    // Blocking stdin reader feeding the async loop.
    let (line_tx, mut line_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    if !cli.json {
        println!(
            "Enter a square (1-9 or a label like \"center\"), r to restart, m to switch mode, q to quit."
        );
    }

    let mut snapshot: Option<Snapshot> = None;
    let mut stdin_open = true;
    loop {
        tokio::select! {
            ev = event_rx.recv() => match ev {
                Some(ev) => render(cli.json, &mut snapshot, ev)?,
                // Driver is gone; the match is over.
                None => break,
            },
            line = line_rx.recv(), if stdin_open => match line {
                Some(line) => handle_line(&line, &snapshot, &control_tx, &x_tx, &o_tx),
                None => {
                    stdin_open = false;
                    let _ = control_tx.send(Control::Quit);
                }
            },
        }
    }

    driver_task.await??;
    Ok(())
}

/// Routes one line of input to the right channel.
fn handle_line(
    line: &str,
    snapshot: &Option<Snapshot>,
    control_tx: &mpsc::UnboundedSender<Control>,
    x_tx: &mpsc::UnboundedSender<Position>,
    o_tx: &mpsc::UnboundedSender<Position>,
) {
    let input = line.trim();
    if input.is_empty() {
        return;
    }

    match input {
        "q" | "quit" => {
            let _ = control_tx.send(Control::Quit);
        }
        "r" | "restart" => {
            let _ = control_tx.send(Control::Restart);
        }
        "m" | "mode" => {
            let Some(snap) = snapshot else { return };
            let (mode, name_o) = match snap.mode {
                Mode::SinglePlayer => (Mode::Multiplayer, "Player O".to_string()),
                Mode::Multiplayer => (Mode::SinglePlayer, "Computer".to_string()),
            };
            let _ = control_tx.send(Control::ChangeMode {
                mode,
                name_x: snap.seat_x.name.clone(),
                name_o,
            });
        }
        _ => match parse_square(input) {
            Some(position) => route_move(position, snapshot, x_tx, o_tx),
            None => println!("Unrecognized input: {input}"),
        },
    }
}

/// Parses a square from the board's 1-9 numbering or a label.
fn parse_square(input: &str) -> Option<Position> {
    if let Ok(n) = input.parse::<usize>() {
        return (1..=9).contains(&n).then(|| Position::from_index(n - 1)).flatten();
    }
    Position::from_label_or_number(input)
}

/// Sends a move to the seat whose turn it is.
fn route_move(
    position: Position,
    snapshot: &Option<Snapshot>,
    x_tx: &mpsc::UnboundedSender<Position>,
    o_tx: &mpsc::UnboundedSender<Position>,
) {
    let Some(snap) = snapshot else { return };

    if snap.outcome.is_some() {
        println!("Game over - press r for the next game.");
        return;
    }

    let seat = match snap.to_move {
        Mark::X => &snap.seat_x,
        Mark::O => &snap.seat_o,
    };
    if seat.kind == SeatKind::Computer {
        println!("It's {}'s turn.", seat.name);
        return;
    }

    let tx = match snap.to_move {
        Mark::X => x_tx,
        Mark::O => o_tx,
    };
    let _ = tx.send(position);
}

/// Prints one event, as text or a JSON line.
fn render(json: bool, snapshot: &mut Option<Snapshot>, event: GameEvent) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&event)?);
        if let GameEvent::State(snap) = event {
            *snapshot = Some(snap);
        }
        return Ok(());
    }

    match event {
        GameEvent::State(snap) => {
            println!("\n{}\n", snap.board.display());
            if snap.outcome.is_none() {
                let name = match snap.to_move {
                    Mark::X => &snap.seat_x.name,
                    Mark::O => &snap.seat_o.name,
                };
                println!("{} ({}) to move.", name, snap.to_move);
            }
            *snapshot = Some(snap);
        }
        GameEvent::MoveMade {
            name,
            mark,
            position,
        } => println!("{name} ({mark}) played {position}."),
        GameEvent::Thinking { name } => println!("{name} is thinking..."),
        GameEvent::MoveRejected { reason } => println!("{reason}"),
        GameEvent::GameOver { outcome, score } => {
            println!("{outcome}. Score: X {} - O {}.", score.x, score.o);
            println!("Press r for the next game, m to switch mode, q to quit.");
        }
        GameEvent::MatchReset => println!("New game."),
        GameEvent::ModeChanged { mode } => println!("Mode changed to {mode}. Score reset."),
    }

    Ok(())
}
