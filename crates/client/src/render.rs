//! Prints runtime events to stdout.
//!
//! Text mode keeps a [`BoardView`] in sync from the event stream and redraws
//! it at the start of every human turn. JSON mode prints one event per line.
use std::collections::BTreeMap;
use std::fmt::Write as _;

use beam_core::{ControllerKind, PieceKind, Player, PlayerId, Space};
use beam_runtime::{Event, GameEvent, GameOutcome, TurnEvent};

use crate::config::EventFormat;

/// Piece positions as reported by the runtime.
#[derive(Debug, Clone, Default)]
pub struct BoardView {
    rows: i32,
    cols: i32,
    pieces: BTreeMap<PlayerId, (PieceKind, Space)>,
}

impl BoardView {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows: rows as i32,
            cols: cols as i32,
            pieces: BTreeMap::new(),
        }
    }

    pub fn reset(&mut self, players: &[Player]) {
        self.pieces = players
            .iter()
            .map(|p| (p.id, (p.piece, p.position)))
            .collect();
    }

    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::Game(GameEvent::Started { players }) => self.reset(players),
            Event::Game(GameEvent::Eliminated { player, .. }) => {
                self.pieces.remove(player);
            }
            Event::Turn(TurnEvent::MoveApplied { player, to, .. }) => {
                if let Some((_, position)) = self.pieces.get_mut(player) {
                    *position = *to;
                }
            }
            _ => {}
        }
    }

    /// Grid drawn with the highest `up` row first. Candidates show as `*`.
    pub fn draw(&self, candidates: &[Space]) -> String {
        let mut out = String::new();
        for up in (0..self.rows).rev() {
            let _ = write!(out, "{up:>2} ");
            for across in 0..self.cols {
                let space = Space::new(up, across);
                out.push(self.glyph(space, candidates));
                out.push(' ');
            }
            out.push('\n');
        }
        out.push_str("   ");
        for across in 0..self.cols {
            let _ = write!(out, "{} ", across % 10);
        }
        out.push('\n');
        out
    }

    fn glyph(&self, space: Space, candidates: &[Space]) -> char {
        let occupant = self
            .pieces
            .values()
            .find(|(_, position)| *position == space)
            .map(|(piece, _)| *piece);
        match occupant {
            Some(PieceKind::Eye) => 'E',
            Some(PieceKind::Blocker) => 'B',
            Some(PieceKind::Inhabitant) => 'I',
            None if candidates.contains(&space) => '*',
            None => '.',
        }
    }

    fn piece_of(&self, player: PlayerId) -> Option<PieceKind> {
        self.pieces.get(&player).map(|(piece, _)| *piece)
    }
}

pub struct EventPrinter {
    format: EventFormat,
    view: BoardView,
}

impl EventPrinter {
    pub fn new(format: EventFormat, view: BoardView) -> Self {
        Self { format, view }
    }

    /// Renders one event, or `None` when it has nothing to show.
    pub fn render(&mut self, event: &Event) -> Option<String> {
        self.view.apply(event);
        match self.format {
            EventFormat::Json => match serde_json::to_string(event) {
                Ok(line) => Some(line),
                Err(error) => {
                    tracing::warn!(%error, "Failed to serialize event");
                    None
                }
            },
            EventFormat::Text => self.describe(event),
        }
    }

    fn describe(&self, event: &Event) -> Option<String> {
        let text = match event {
            Event::Phase(_) => return None,
            Event::Game(GameEvent::Started { players }) => {
                format!("game started with {} pieces\n{}", players.len(), self.view.draw(&[]))
            }
            Event::Turn(TurnEvent::Started {
                player,
                controller: ControllerKind::Human,
                candidates,
            }) => {
                let piece = self.view.piece_of(*player).map_or("piece", |p| p.into());
                format!(
                    "{}player {player} ({piece}) to move; enter `up across` or `q` to quit",
                    self.view.draw(candidates)
                )
            }
            Event::Turn(TurnEvent::Started { player, .. }) => {
                format!("computer {player} is thinking")
            }
            Event::Turn(TurnEvent::SelectionRejected { space, .. }) => {
                format!("{space} is not a legal destination")
            }
            Event::Turn(TurnEvent::MoveApplied { player, from, to }) => {
                format!("{player} moved {from} -> {to}")
            }
            Event::Turn(TurnEvent::MoveRejected { player, to, reason }) => {
                format!("{player} could not move to {to}: {reason}")
            }
            Event::Turn(TurnEvent::Skipped { player }) => format!("{player} has no moves"),
            Event::Game(GameEvent::Eliminated { player, .. }) => {
                format!("{player} was caught by the beam")
            }
            Event::Game(GameEvent::RoundCompleted { round, remaining }) => {
                format!("round {round} done, {remaining} left")
            }
            Event::Game(GameEvent::Over { outcome, rounds }) => {
                format!("{} after {rounds} rounds", describe_outcome(outcome))
            }
            Event::Game(GameEvent::Aborted { .. }) => "game exited".to_string(),
        };
        Some(text)
    }
}

pub fn describe_outcome(outcome: &GameOutcome) -> String {
    match outcome {
        GameOutcome::Winner(player) => format!("{player} wins"),
        GameOutcome::NoSurvivors => "nobody survived".to_string(),
        GameOutcome::RoundLimit => "round limit reached".to_string(),
        GameOutcome::Aborted => "game exited".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> BoardView {
        let mut view = BoardView::new(3, 3);
        view.reset(&[
            Player::new(PlayerId(0), PieceKind::Eye, Space::new(0, 1)),
            Player::new(PlayerId(1), PieceKind::Inhabitant, Space::new(2, 2)),
        ]);
        view
    }

    #[test]
    fn draws_pieces_and_candidates() {
        let drawn = view().draw(&[Space::new(1, 1)]);
        assert_eq!(drawn, " 2 . . I \n 1 . * . \n 0 . E . \n   0 1 2 \n");
    }

    #[test]
    fn follows_moves_and_eliminations() {
        let mut view = view();
        view.apply(&Event::Turn(TurnEvent::MoveApplied {
            player: PlayerId(1),
            from: Space::new(2, 2),
            to: Space::new(1, 2),
        }));
        view.apply(&Event::Game(GameEvent::Eliminated {
            player: PlayerId(0),
            index: 0,
        }));
        assert_eq!(view.draw(&[]), " 2 . . . \n 1 . . I \n 0 . . . \n   0 1 2 \n");
    }

    #[test]
    fn json_mode_prints_one_line_per_event() {
        let mut printer = EventPrinter::new(EventFormat::Json, view());
        let line = printer
            .render(&Event::Game(GameEvent::RoundCompleted {
                round: 1,
                remaining: 2,
            }))
            .unwrap();
        assert!(!line.contains('\n'));
        assert!(line.contains("RoundCompleted"));
    }

    #[test]
    fn text_mode_hides_phase_events() {
        let mut printer = EventPrinter::new(EventFormat::Text, view());
        let event = Event::Phase(beam_runtime::PhaseEvent {
            from: beam_core::Phase::Idle,
            to: beam_core::Phase::WaitingForInput,
            player: None,
        });
        assert_eq!(printer.render(&event), None);
    }
}
