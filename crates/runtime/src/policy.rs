//! Decision procedures for computer-controlled players.
//!
//! Runtime users plug in [`TurnPolicy`] implementations so computer turns can
//! run with random play, scripted fixtures, or smarter AI.
use std::sync::Mutex;

use async_trait::async_trait;
use beam_core::{Player, Space};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks one destination from a legal-candidate set.
#[async_trait]
pub trait TurnPolicy: Send + Sync {
    /// Returns the chosen destination, or `None` to pass the turn.
    ///
    /// A returned space must be a member of `candidates`; the executor
    /// treats anything else as a pass.
    async fn choose(&self, player: &Player, candidates: &[Space]) -> Option<Space>;
}

/// Uniform random choice among the candidates.
pub struct RandomPolicy {
    rng: Mutex<StdRng>,
}

impl RandomPolicy {
    /// Reproducible choices for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Seeded when `seed` is set, entropy-backed otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[async_trait]
impl TurnPolicy for RandomPolicy {
    async fn choose(&self, player: &Player, candidates: &[Space]) -> Option<Space> {
        if candidates.is_empty() {
            return None;
        }

        let index = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            rng.random_range(0..candidates.len())
        };

        tracing::debug!(
            target: "beam::policy",
            player = %player.id,
            index,
            of = candidates.len(),
            "Random policy chose candidate"
        );
        Some(candidates[index])
    }
}

/// Always takes the first candidate. Useful for tests and replays.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidatePolicy;

#[async_trait]
impl TurnPolicy for FirstCandidatePolicy {
    async fn choose(&self, _player: &Player, candidates: &[Space]) -> Option<Space> {
        candidates.first().copied()
    }
}
