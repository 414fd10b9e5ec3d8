//! Executor registry for managing multiple turn executors.

use std::collections::HashMap;
use std::sync::Arc;

use beam_core::ControllerKind;

use super::{ComputerExecutor, HumanExecutor, TurnExecutor};
use crate::api::{Result, RuntimeError};
use crate::policy::TurnPolicy;

/// Registry mapping controller kinds to turn executors.
///
/// The scheduler looks up the executor for each player's controller at
/// the start of its turn, so the mapping can differ per game.
#[derive(Clone, Default)]
pub struct ExecutorRegistry {
    executors: HashMap<ControllerKind, Arc<dyn TurnExecutor>>,
}

impl ExecutorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Human and computer executors, the latter driven by `policy`.
    pub fn with_defaults(policy: Arc<dyn TurnPolicy>) -> Self {
        let mut registry = Self::new();
        registry.register(ControllerKind::Human, HumanExecutor);
        registry.register(ControllerKind::Computer, ComputerExecutor::new(policy));
        registry
    }

    /// Register an executor for a controller kind, replacing any previous one.
    pub fn register(&mut self, kind: ControllerKind, executor: impl TurnExecutor + 'static) {
        self.register_arc(kind, Arc::new(executor));
    }

    pub fn register_arc(&mut self, kind: ControllerKind, executor: Arc<dyn TurnExecutor>) {
        self.executors.insert(kind, executor);
    }

    pub fn get(&self, kind: ControllerKind) -> Result<Arc<dyn TurnExecutor>> {
        self.executors
            .get(&kind)
            .cloned()
            .ok_or(RuntimeError::ExecutorNotSet { kind })
    }

    pub fn has(&self, kind: ControllerKind) -> bool {
        self.executors.contains_key(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::FirstCandidatePolicy;

    #[test]
    fn defaults_cover_both_controllers() {
        let registry = ExecutorRegistry::with_defaults(Arc::new(FirstCandidatePolicy));
        assert!(registry.has(ControllerKind::Human));
        assert!(registry.has(ControllerKind::Computer));
        assert_eq!(registry.get(ControllerKind::Computer).unwrap().name(), "computer");
    }

    #[test]
    fn missing_executor_is_an_error() {
        let registry = ExecutorRegistry::new();
        assert!(matches!(
            registry.get(ControllerKind::Human),
            Err(RuntimeError::ExecutorNotSet {
                kind: ControllerKind::Human
            })
        ));
    }
}
