use greenplan_core::models::{
    Configuration, EnergyReport, EnvironmentConditions, LocationId, RoomLocations,
    RoomReadingReport, RoomType,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tabled::Tabled;

/// Output for the score command
#[derive(Debug, Serialize)]
pub struct ScoreOutput {
    pub conditions: EnvironmentConditions,
    pub room_locations: RoomLocations,

    /// Mean room readings classified against the rules
    pub readings: BTreeMap<RoomType, RoomReadingReport>,

    pub report: EnergyReport,
}

/// One configuration value with its source
#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub value: String,
    pub source: String,
}

#[derive(Tabled)]
pub struct ConfigurationRow {
    #[tabled(rename = "Configuration")]
    pub name: String,
    #[tabled(rename = "Grade")]
    pub grade: String,
    #[tabled(rename = "Total")]
    pub total: String,
    #[tabled(rename = "Temperature")]
    pub temperature: String,
    #[tabled(rename = "Light")]
    pub light: String,
    #[tabled(rename = "Humidity")]
    pub humidity: String,
    #[tabled(rename = "Violations")]
    pub violations: usize,
}

impl From<&Configuration> for ConfigurationRow {
    fn from(configuration: &Configuration) -> Self {
        let report = &configuration.energy_report;
        Self {
            name: configuration.name.clone(),
            grade: report.grade.to_string(),
            total: format!("{:.2}", report.total_score),
            temperature: format!("{:.2}", report.detailed_scores.temperature_adaptation),
            light: format!("{:.2}", report.detailed_scores.natural_light_utilization),
            humidity: format!("{:.2}", report.detailed_scores.humidity_control),
            violations: configuration.constraints.violations.len(),
        }
    }
}

#[derive(Tabled)]
pub struct LocationRow {
    #[tabled(rename = "Room")]
    pub room: String,
    #[tabled(rename = "Locations")]
    pub locations: String,
}

impl LocationRow {
    pub fn rows(locations: &RoomLocations) -> Vec<Self> {
        RoomType::ALL
            .into_iter()
            .map(|room| {
                let ids = locations.get(&room).map(Vec::as_slice).unwrap_or_default();
                let text = if ids.is_empty() {
                    "-".to_string()
                } else {
                    ids.iter().map(LocationId::token).collect::<Vec<_>>().join(", ")
                };
                Self { room: room.to_string(), locations: text }
            })
            .collect()
    }
}

#[derive(Tabled)]
pub struct RuleRow {
    #[tabled(rename = "Room")]
    pub room: String,
    #[tabled(rename = "Factor")]
    pub factor: String,
    #[tabled(rename = "Ideal")]
    pub ideal: String,
    #[tabled(rename = "Min")]
    pub min: String,
    #[tabled(rename = "Max")]
    pub max: String,
}

#[derive(Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}
