use serde::{Deserialize, Serialize};
use std::fmt;

/// Energy efficiency grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

/// Raw scores of a configuration, rounded to two decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyScores {
    pub total_score: f64,
    pub temperature_score: f64,
    pub light_score: f64,
    pub humidity_score: f64,
}

/// Sub-scores as presented in a report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetailedScores {
    pub temperature_adaptation: f64,
    pub natural_light_utilization: f64,
    pub humidity_control: f64,
}

impl From<&EnergyScores> for DetailedScores {
    fn from(scores: &EnergyScores) -> Self {
        Self {
            temperature_adaptation: scores.temperature_score,
            natural_light_utilization: scores.light_score,
            humidity_control: scores.humidity_score,
        }
    }
}

/// Energy efficiency report of one configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyReport {
    #[serde(rename = "energy_efficiency_grade")]
    pub grade: Grade,
    pub total_score: f64,
    pub detailed_scores: DetailedScores,
    pub explanation: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}
