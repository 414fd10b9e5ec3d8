//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{GameEvent, PhaseEvent, TurnEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Phase machine transitions
    Phase,
    /// Per-turn events (candidates, selections, moves)
    Turn,
    /// Game lifecycle (start, eliminations, rounds, game over)
    Game,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Phase(PhaseEvent),
    Turn(TurnEvent),
    Game(GameEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Phase(_) => Topic::Phase,
            Event::Turn(_) => Topic::Turn,
            Event::Game(_) => Topic::Game,
        }
    }
}

struct Channels {
    phase: broadcast::Sender<Event>,
    turn: broadcast::Sender<Event>,
    game: broadcast::Sender<Event>,
    /// Every event in publish order, across topics.
    all: broadcast::Sender<Event>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Phase => &self.phase,
            Topic::Turn => &self.turn,
            Topic::Game => &self.game,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Channels exist for every topic from construction,
/// so subscribing never fails.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                phase: broadcast::channel(capacity).0,
                turn: broadcast::channel(capacity).0,
                game: broadcast::channel(capacity).0,
                all: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        let _ = self.channels.all.send(event.clone());
        if self.channels.get(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.get(topic).subscribe()
    }

    /// Subscribe to every topic through one receiver that preserves the
    /// order events were published in.
    pub fn subscribe_all(&self) -> broadcast::Receiver<Event> {
        self.channels.all.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beam_core::{Phase, PlayerId};

    #[tokio::test]
    async fn routes_events_by_topic() {
        let bus = EventBus::with_capacity(8);
        let mut phase_rx = bus.subscribe(Topic::Phase);
        let mut game_rx = bus.subscribe(Topic::Game);

        bus.publish(Event::Phase(PhaseEvent {
            from: Phase::Idle,
            to: Phase::WaitingForInput,
            player: Some(PlayerId(1)),
        }));

        let received = phase_rx.recv().await.unwrap();
        assert_eq!(received.topic(), Topic::Phase);
        assert!(game_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn subscribe_all_keeps_publish_order_across_topics() {
        let bus = EventBus::new();
        let mut all = bus.subscribe_all();

        bus.publish(Event::Game(GameEvent::RoundCompleted {
            round: 1,
            remaining: 2,
        }));
        bus.publish(Event::Turn(TurnEvent::Skipped {
            player: PlayerId(0),
        }));

        assert_eq!(all.recv().await.unwrap().topic(), Topic::Game);
        assert_eq!(all.recv().await.unwrap().topic(), Topic::Turn);
    }

    #[test]
    fn publish_without_subscribers_is_harmless() {
        let bus = EventBus::new();
        bus.publish(Event::Game(GameEvent::RoundCompleted {
            round: 1,
            remaining: 2,
        }));
    }
}
