use uuid::Uuid;

use crate::error::Result;
use crate::models::DesignOutcome;

/// Port for persisting design outcomes
pub trait DesignStore: Send + Sync {
    /// Persist an outcome and make it the latest one
    fn save(&self, outcome: &DesignOutcome) -> Result<Uuid>;

    /// The most recently saved outcome
    fn latest(&self) -> Result<Option<DesignOutcome>>;

    /// All saved outcomes, oldest first
    fn history(&self) -> Result<Vec<DesignOutcome>>;
}

impl<S: DesignStore + ?Sized> DesignStore for &S {
    fn save(&self, outcome: &DesignOutcome) -> Result<Uuid> {
        (**self).save(outcome)
    }

    fn latest(&self) -> Result<Option<DesignOutcome>> {
        (**self).latest()
    }

    fn history(&self) -> Result<Vec<DesignOutcome>> {
        (**self).history()
    }
}
