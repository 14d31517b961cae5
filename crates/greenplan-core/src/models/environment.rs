use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::RoomType;

/// Calendar season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day or night
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Day,
    Night,
}

impl TimeOfDay {
    pub fn is_day(&self) -> bool {
        matches!(self, TimeOfDay::Day)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Day => "day",
            TimeOfDay::Night => "night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Environmental factor tracked per room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Factor {
    Temperature,
    Humidity,
    Sunlight,
}

impl Factor {
    pub const ALL: [Factor; 3] = [Factor::Temperature, Factor::Humidity, Factor::Sunlight];
}

/// Target value with an inclusive acceptable interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetRange {
    pub ideal: f64,

    /// Inclusive `(min, max)`
    pub range: (f64, f64),
}

impl TargetRange {
    pub fn new(ideal: f64, min: f64, max: f64) -> Self {
        Self { ideal, range: (min, max) }
    }

    pub fn min(&self) -> f64 {
        self.range.0
    }

    pub fn max(&self) -> f64 {
        self.range.1
    }

    /// Width of the acceptable interval
    pub fn width(&self) -> f64 {
        self.range.1 - self.range.0
    }

    /// Shift ideal and both bounds by `delta`
    pub fn shifted(&self, delta: f64) -> Self {
        Self::new(self.ideal + delta, self.range.0 + delta, self.range.1 + delta)
    }

    /// Classify an observed value against the interval
    pub fn classify(&self, value: f64) -> ReadingStatus {
        if value < self.range.0 {
            ReadingStatus::Low
        } else if value > self.range.1 {
            ReadingStatus::High
        } else {
            ReadingStatus::Normal
        }
    }
}

/// Targets for one room type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomTargets {
    pub temperature: TargetRange,
    pub humidity: TargetRange,
    pub sunlight: TargetRange,
}

impl RoomTargets {
    pub fn factor(&self, factor: Factor) -> &TargetRange {
        match factor {
            Factor::Temperature => &self.temperature,
            Factor::Humidity => &self.humidity,
            Factor::Sunlight => &self.sunlight,
        }
    }
}

/// Rule set for a moment in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentRules {
    pub season: Season,
    pub time_of_day: TimeOfDay,
    pub rooms: BTreeMap<RoomType, RoomTargets>,
}

impl EnvironmentRules {
    pub fn targets(&self, room_type: RoomType) -> Option<&RoomTargets> {
        self.rooms.get(&room_type)
    }
}

/// Named special conditions that shift a rule set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialConditions {
    /// Lower humidity targets by 5 points
    #[serde(default)]
    pub high_humidity_warning: bool,

    /// Raise temperature targets by 2 °C
    #[serde(default)]
    pub heat_wave: bool,
}

impl SpecialConditions {
    pub fn is_empty(&self) -> bool {
        !self.high_humidity_warning && !self.heat_wave
    }
}

/// Classification of an observed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingStatus {
    Low,
    Normal,
    High,
}

/// One classified reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorReading {
    pub value: f64,
    pub ideal: f64,
    pub status: ReadingStatus,
}

/// Classified readings of one room
pub type RoomReadingReport = BTreeMap<Factor, FactorReading>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_is_inclusive() {
        let target = TargetRange::new(22.0, 20.0, 24.0);
        assert_eq!(target.classify(20.0), ReadingStatus::Normal);
        assert_eq!(target.classify(24.0), ReadingStatus::Normal);
        assert_eq!(target.classify(19.9), ReadingStatus::Low);
        assert_eq!(target.classify(24.1), ReadingStatus::High);
    }

    #[test]
    fn test_shifted_moves_all_bounds() {
        let target = TargetRange::new(70.0, 60.0, 75.0).shifted(-5.0);
        assert_eq!(target.ideal, 65.0);
        assert_eq!(target.range, (55.0, 70.0));
        assert_eq!(target.width(), 15.0);
    }
}
