//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use beam_core::{Board, ControllerKind, MoveError, PieceKind, Player, PlayerId, Roster, Space};
use beam_runtime::{Event, GameHandle, RuntimeConfig, Topic};
use tokio::sync::broadcast;

/// Everything the board observed, shared with the test body.
#[derive(Debug, Default)]
pub struct BoardLog {
    pub resets: usize,
    pub moves: Vec<(PlayerId, Space)>,
    pub beam_updates: usize,
    pub beam_visible: bool,
    pub highlighted_spaces: Vec<Space>,
    pub highlighted_piece: Option<PlayerId>,
    pub released: Vec<PlayerId>,
    /// Roster ids seen by each elimination pass.
    pub evaluations: Vec<Vec<PlayerId>>,
}

/// Unbounded plane board with scripted eliminations.
///
/// Adjacency is the four orthogonal neighbours minus occupied spaces, every
/// legal move is accepted unless `reject_moves` is set, and each call to
/// `evaluate_elimination` pops the next entry of the script.
pub struct RecordingBoard {
    starting: Vec<Player>,
    positions: BTreeMap<PlayerId, Space>,
    script: VecDeque<Vec<usize>>,
    initial_script: VecDeque<Vec<usize>>,
    reject_moves: bool,
    log: Arc<Mutex<BoardLog>>,
}

impl RecordingBoard {
    pub fn new(players: Vec<Player>) -> Self {
        Self {
            starting: players,
            positions: BTreeMap::new(),
            script: VecDeque::new(),
            initial_script: VecDeque::new(),
            reject_moves: false,
            log: Arc::new(Mutex::new(BoardLog::default())),
        }
    }

    /// `script[n]` is returned by the n-th elimination pass of a game.
    pub fn with_script(mut self, script: Vec<Vec<usize>>) -> Self {
        self.initial_script = script.into();
        self
    }

    pub fn rejecting_moves(mut self) -> Self {
        self.reject_moves = true;
        self
    }

    pub fn log(&self) -> Arc<Mutex<BoardLog>> {
        Arc::clone(&self.log)
    }

    fn lock(&self) -> MutexGuard<'_, BoardLog> {
        self.log.lock().unwrap()
    }
}

impl Board for RecordingBoard {
    fn reset(&mut self) -> Vec<Player> {
        self.positions = self.starting.iter().map(|p| (p.id, p.position)).collect();
        self.script = self.initial_script.clone();
        let mut log = self.lock();
        log.resets += 1;
        log.beam_visible = false;
        log.highlighted_spaces.clear();
        log.highlighted_piece = None;
        drop(log);
        self.starting.clone()
    }

    fn adjacent_spaces(&self, from: Space) -> Vec<Space> {
        from.neighbors4()
            .into_iter()
            .filter(|space| !self.positions.values().any(|p| p == space))
            .collect()
    }

    fn try_move(&mut self, player: PlayerId, to: Space) -> Result<(), MoveError> {
        let from = *self
            .positions
            .get(&player)
            .ok_or(MoveError::UnknownPlayer(player))?;
        if self.reject_moves || self.positions.values().any(|p| *p == to) {
            return Err(MoveError::Occupied(to));
        }
        if !from.is_orthogonally_adjacent(to) {
            return Err(MoveError::NotAdjacent { from, to });
        }
        self.positions.insert(player, to);
        self.lock().moves.push((player, to));
        Ok(())
    }

    fn evaluate_elimination(&mut self, roster: &Roster) -> Vec<usize> {
        self.lock().evaluations.push(roster.ids());
        self.script.pop_front().unwrap_or_default()
    }

    fn update_beam(&mut self) {
        let mut log = self.lock();
        log.beam_updates += 1;
        log.beam_visible = true;
    }

    fn set_beam_visible(&mut self, visible: bool) {
        self.lock().beam_visible = visible;
    }

    fn beam_visible(&self) -> bool {
        self.lock().beam_visible
    }

    fn set_candidate_highlight(&mut self, player: PlayerId, spaces: &[Space], on: bool) {
        let mut log = self.lock();
        if on {
            log.highlighted_spaces = spaces.to_vec();
            log.highlighted_piece = Some(player);
        } else {
            log.highlighted_spaces.clear();
            log.highlighted_piece = None;
        }
    }

    fn release(&mut self, player: PlayerId) {
        self.positions.remove(&player);
        self.lock().released.push(player);
    }
}

/// Players spread out along the `across` axis so none starts adjacent.
pub fn players(controller: ControllerKind, count: u32) -> Vec<Player> {
    (0..count)
        .map(|i| {
            Player::new(PlayerId(i), PieceKind::Inhabitant, Space::new(0, i as i32 * 4))
                .with_controller(controller)
        })
        .collect()
}

pub fn test_config() -> RuntimeConfig {
    RuntimeConfig {
        cpu_turn_delay: Duration::from_millis(10),
        event_buffer_size: 1024,
        ..RuntimeConfig::default()
    }
}

/// Receives events until `pred` matches, returning the match.
pub async fn next_matching(
    rx: &mut broadcast::Receiver<Event>,
    mut pred: impl FnMut(&Event) -> bool,
) -> Event {
    loop {
        let event = rx.recv().await.expect("event bus closed");
        if pred(&event) {
            return event;
        }
    }
}

/// Drains whatever is already queued on the receiver.
pub fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn subscribe(handle: &GameHandle, topic: Topic) -> broadcast::Receiver<Event> {
    handle.subscribe(topic)
}
