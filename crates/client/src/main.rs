//! Beam terminal client.
//!
//! Composition root that assembles:
//! 1. Configuration from the environment (and `.env`)
//! 2. Logging
//! 3. The standard board and the runtime
//! 4. The stdin selection source and the event printer
//!
//! # Examples
//!
//! ```bash
//! # play the human pieces against the Eye
//! cargo run -p beam-client
//!
//! # watch a seeded computer-only game as JSON
//! BEAM_AUTOPLAY=1 BEAM_RNG_SEED=7 BEAM_EVENT_FORMAT=json cargo run -p beam-client
//! ```
mod config;
mod input;
mod logging;
mod render;

use anyhow::{Context, Result, anyhow};
use beam_core::{BoardLayout, ControllerKind, GridBoard, Phase};
use beam_runtime::{Event, Runtime};
use tokio::sync::{broadcast, oneshot};

use config::ClientConfig;
use render::{BoardView, EventPrinter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = ClientConfig::from_env();

    // 2. Setup logging
    let log_guard = logging::setup_logging(&config)?;
    tracing::info!(
        autoplay = config.autoplay,
        format = %config.event_format,
        max_rounds = ?config.runtime.max_rounds,
        "Starting beam client"
    );

    // 3. Build the board and the runtime
    let layout = board_layout(config.autoplay);
    let view = BoardView::new(layout.rows, layout.cols);
    let board = GridBoard::new(layout).context("invalid board layout")?;

    let mut runtime = Runtime::builder()
        .config(config.runtime.clone())
        .board(board)
        .build()?;
    let handle = runtime.handle();

    // 4. Wire the printer and the selection source
    let printer = EventPrinter::new(config.event_format, view);
    let printer_task = tokio::spawn(print_events(printer, handle.subscribe_all()));

    let (quit_tx, quit_rx) = oneshot::channel();
    // autoplay keeps running when stdin is closed
    let input_task = tokio::spawn(input::run_stdin(handle.clone(), quit_tx, !config.autoplay));

    // 5. Play until game over, quit or Ctrl-C
    runtime.enter_game().await?;

    let finished = tokio::select! {
        result = handle.wait_for_phase(Phase::GameOver) => {
            result?;
            true
        }
        Ok(()) = quit_rx => false,
        _ = tokio::signal::ctrl_c() => false,
    };

    let report = if finished {
        runtime.wait_for_game_over().await?
    } else {
        runtime
            .exit_game()
            .await?
            .ok_or_else(|| anyhow!("game was not running"))?
    };

    tracing::info!(outcome = ?report.outcome, rounds = report.rounds, "Session finished");
    input_task.abort();
    let _ = input_task.await;
    drop(runtime);
    drop(handle);
    let _ = printer_task.await;

    println!(
        "{} ({} rounds, {} pieces left)",
        render::describe_outcome(&report.outcome),
        report.rounds,
        report.survivors.len()
    );

    drop(log_guard);
    // the stdin reader may still be parked on a blocking read
    std::process::exit(0);
}

fn board_layout(autoplay: bool) -> BoardLayout {
    let mut layout = BoardLayout::standard();
    if autoplay {
        for spec in &mut layout.pieces {
            *spec = spec.controlled_by(ControllerKind::Computer);
        }
    }
    layout
}

/// Prints events until the bus closes.
async fn print_events(mut printer: EventPrinter, mut events: broadcast::Receiver<Event>) {
    loop {
        match events.recv().await {
            Ok(event) => {
                if let Some(text) = printer.render(&event) {
                    println!("{text}");
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Event printer lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
