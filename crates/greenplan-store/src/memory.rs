//! In-memory design store
//!
//! Keeps saved outcomes in insertion order behind an `RwLock`. A poisoned
//! lock surfaces as a storage error.

use greenplan_core::error::{GreenplanError, Result};
use greenplan_core::models::DesignOutcome;
use greenplan_core::ports::DesignStore;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::outcome_id;

/// Design store that lives for the duration of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryDesignStore {
    outcomes: Arc<RwLock<Vec<(Uuid, DesignOutcome)>>>,
}

impl MemoryDesignStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saved outcomes
    pub fn len(&self) -> usize {
        self.outcomes.read().map(|outcomes| outcomes.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Outcome saved under `id`
    pub fn get(&self, id: Uuid) -> Result<Option<DesignOutcome>> {
        let outcomes = self.outcomes.read().map_err(poisoned)?;
        Ok(outcomes.iter().find(|(saved, _)| *saved == id).map(|(_, outcome)| outcome.clone()))
    }
}

impl DesignStore for MemoryDesignStore {
    fn save(&self, outcome: &DesignOutcome) -> Result<Uuid> {
        let id = outcome_id(outcome);
        let mut outcomes = self.outcomes.write().map_err(poisoned)?;
        outcomes.push((id, outcome.clone()));
        tracing::debug!(%id, total = outcomes.len(), "Stored design outcome in memory");
        Ok(id)
    }

    fn latest(&self) -> Result<Option<DesignOutcome>> {
        let outcomes = self.outcomes.read().map_err(poisoned)?;
        Ok(outcomes.last().map(|(_, outcome)| outcome.clone()))
    }

    fn history(&self) -> Result<Vec<DesignOutcome>> {
        let outcomes = self.outcomes.read().map_err(poisoned)?;
        Ok(outcomes.iter().map(|(_, outcome)| outcome.clone()).collect())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> GreenplanError {
    GreenplanError::Storage("design store lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_empty_store() {
        let store = MemoryDesignStore::new();
        assert!(store.is_empty());
        assert!(store.latest().unwrap().is_none());
        assert!(store.history().unwrap().is_empty());
    }

    #[test]
    fn test_completed_outcome_keeps_its_id() {
        let store = MemoryDesignStore::new();
        let outcome = fixtures::completed();
        let expected = outcome.result().unwrap().meta_info.id;

        let id = store.save(&outcome).unwrap();
        assert_eq!(id, expected);
        assert_eq!(store.get(id).unwrap(), Some(outcome));
    }

    #[test]
    fn test_latest_and_history_order() {
        let store = MemoryDesignStore::new();
        store.save(&fixtures::failure("first")).unwrap();
        store.save(&fixtures::completed()).unwrap();
        store.save(&fixtures::failure("third")).unwrap();

        let history = store.history().unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].failure().unwrap().error, "first");
        assert!(history[1].is_completed());
        assert_eq!(store.latest().unwrap().unwrap().failure().unwrap().error, "third");
    }

    #[test]
    fn test_clones_share_storage() {
        let store = MemoryDesignStore::new();
        let handle = store.clone();
        handle.save(&fixtures::failure("shared")).unwrap();
        assert_eq!(store.len(), 1);
    }
}
