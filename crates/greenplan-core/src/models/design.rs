use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::{
    ConstraintReport, DesignRequest, EnergyReport, EnvironmentRules, LocationTable, RoomLayout,
    RoomLocations, RoomType, Season, TimeOfDay,
};

/// Result format version
pub const RESULT_VERSION: &str = "1.0";

/// A candidate as proposed by the text generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateConfiguration {
    pub name: String,

    /// Layout description following the room-location phrasing convention
    pub description: String,

    #[serde(default)]
    pub advantages: BTreeMap<String, String>,

    #[serde(default)]
    pub considerations: BTreeMap<String, String>,
}

/// A scored layout proposal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub name: String,
    pub description: String,
    pub advantages: BTreeMap<String, String>,
    pub considerations: BTreeMap<String, String>,

    /// Locations extracted from the description
    pub room_locations: RoomLocations,

    #[serde(rename = "room_layout")]
    pub layout: RoomLayout,

    pub constraints: ConstraintReport,

    #[serde(rename = "energy_efficiency_report")]
    pub energy_report: EnergyReport,
}

/// Result metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaInfo {
    pub id: Uuid,
    pub timestamp: NaiveDateTime,
    pub version: String,
}

impl MetaInfo {
    pub fn new(timestamp: NaiveDateTime) -> Self {
        Self { id: Uuid::new_v4(), timestamp, version: RESULT_VERSION.to_string() }
    }
}

/// Season and time of day the rules were derived for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConditions {
    pub season: Season,
    pub time_of_day: TimeOfDay,
}

/// Aggregate figures over all configurations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignSummary {
    pub total_area: f64,
    pub room_count: u32,
    pub configuration_count: usize,
    pub best_energy_efficiency: f64,
}

/// Complete design for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignResult {
    pub meta_info: MetaInfo,

    #[serde(rename = "design_data")]
    pub request: DesignRequest,

    /// Single-room area per room type
    pub room_areas: BTreeMap<RoomType, f64>,

    pub room_ratios: BTreeMap<RoomType, f64>,
    pub locations: LocationTable,
    pub environmental_conditions: EnvironmentConditions,

    #[serde(rename = "room_environment_rules")]
    pub rules: EnvironmentRules,

    pub configurations: Vec<Configuration>,
    pub summary: DesignSummary,
}

impl DesignResult {
    /// Configuration with the highest total score
    pub fn best_configuration(&self) -> Option<&Configuration> {
        self.configurations
            .iter()
            .max_by(|a, b| a.energy_report.total_score.total_cmp(&b.energy_report.total_score))
    }
}

/// Returned when no configuration could be built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignFailure {
    pub error: String,

    #[serde(rename = "design_data")]
    pub request: DesignRequest,

    pub timestamp: NaiveDateTime,
}

/// Outcome of a design run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DesignOutcome {
    Completed(DesignResult),
    Failed(DesignFailure),
}

impl DesignOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, DesignOutcome::Completed(_))
    }

    pub fn result(&self) -> Option<&DesignResult> {
        match self {
            DesignOutcome::Completed(result) => Some(result),
            DesignOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&DesignFailure> {
        match self {
            DesignOutcome::Completed(_) => None,
            DesignOutcome::Failed(failure) => Some(failure),
        }
    }

    /// Timestamp of the run
    pub fn timestamp(&self) -> NaiveDateTime {
        match self {
            DesignOutcome::Completed(result) => result.meta_info.timestamp,
            DesignOutcome::Failed(failure) => failure.timestamp,
        }
    }
}
