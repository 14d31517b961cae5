use greenplan_core::models::{EnvironmentSample, LocationTable, RoomLocations, RoomType};
use std::collections::BTreeMap;

/// Samples attributed to one room, never empty
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    samples: Vec<EnvironmentSample>,
}

impl SampleSet {
    pub fn single(sample: EnvironmentSample) -> Self {
        Self { samples: vec![sample] }
    }

    /// `None` when `samples` is empty
    pub fn from_samples(samples: Vec<EnvironmentSample>) -> Option<Self> {
        if samples.is_empty() {
            None
        } else {
            Some(Self { samples })
        }
    }

    pub fn as_slice(&self) -> &[EnvironmentSample] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnvironmentSample> {
        self.samples.iter()
    }
}

pub type RoomSamples = BTreeMap<RoomType, SampleSet>;

/// Look up the samples of every room's locations
///
/// A room without locations is represented by the mean of the whole table.
pub fn resolve_samples(locations: &RoomLocations, table: &LocationTable) -> RoomSamples {
    RoomType::ALL
        .into_iter()
        .map(|room| {
            let samples: Vec<EnvironmentSample> = locations
                .get(&room)
                .map(|ids| ids.iter().map(|id| *table.get(*id)).collect())
                .unwrap_or_default();

            let set = SampleSet::from_samples(samples).unwrap_or_else(|| {
                tracing::debug!(room = %room, "Using mean of all locations");
                SampleSet::single(table.mean())
            });
            (room, set)
        })
        .collect()
}
