//! Stdin selection source.
//!
//! Each line is parsed as a board space and reported through the
//! [`GameHandle`]. The handle ignores reports unless a human turn is waiting.
use beam_core::{ControllerKind, Space};
use beam_runtime::GameHandle;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;

/// One parsed line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select(Space),
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Option<Self>, beam_core::SpaceParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        if matches!(line, "q" | "quit" | "exit") {
            return Ok(Some(Command::Quit));
        }
        line.parse().map(|space| Some(Command::Select(space)))
    }
}

/// Reads stdin until EOF or a quit command.
///
/// `quit_tx` fires on a quit command, and on EOF when `quit_on_eof` is set.
pub async fn run_stdin(handle: GameHandle, quit_tx: oneshot::Sender<()>, quit_on_eof: bool) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) if quit_on_eof => break,
            Ok(None) => return,
            Err(error) => {
                tracing::warn!(%error, "Failed to read stdin");
                break;
            }
        };

        match Command::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Select(space))) => {
                if !handle.report_selection(space) {
                    match handle.active_controller() {
                        Some(ControllerKind::Computer) => {
                            println!("the computer is still thinking, {space} ignored")
                        }
                        _ => println!("not waiting for a move right now, {space} ignored"),
                    }
                }
            }
            Err(error) => println!("{error}"),
        }
    }

    let _ = quit_tx.send(());
}
