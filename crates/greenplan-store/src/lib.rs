//! GreenPlan Store - Design storage adapters
//!
//! Adapters for the [`DesignStore`](greenplan_core::ports::DesignStore) port:
//! an in-memory store for tests and embedding, and a JSON file store that
//! keeps the latest result plus a history directory.

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryDesignStore;

use greenplan_core::models::DesignOutcome;
use uuid::Uuid;

/// Id a stored outcome is filed under
///
/// Completed designs carry their own id; failures get a fresh one.
pub(crate) fn outcome_id(outcome: &DesignOutcome) -> Uuid {
    match outcome {
        DesignOutcome::Completed(result) => result.meta_info.id,
        DesignOutcome::Failed(_) => Uuid::new_v4(),
    }
}
