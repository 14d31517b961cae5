use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::RoomType;
use crate::error::GreenplanError;

/// One of the four fixed reference points of a site
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum LocationId {
    #[serde(rename = "位置A", alias = "A")]
    A,
    #[serde(rename = "位置B", alias = "B")]
    B,
    #[serde(rename = "位置C", alias = "C")]
    C,
    #[serde(rename = "位置D", alias = "D")]
    D,
}

impl LocationId {
    pub const ALL: [LocationId; 4] = [LocationId::A, LocationId::B, LocationId::C, LocationId::D];

    /// Token spelling used in layout descriptions (`位置A`)
    pub fn token(&self) -> &'static str {
        match self {
            LocationId::A => "位置A",
            LocationId::B => "位置B",
            LocationId::C => "位置C",
            LocationId::D => "位置D",
        }
    }

    /// Bare letter (`A`)
    pub fn letter(&self) -> char {
        match self {
            LocationId::A => 'A',
            LocationId::B => 'B',
            LocationId::C => 'C',
            LocationId::D => 'D',
        }
    }

    /// Look up an id by its bare letter
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(LocationId::A),
            'B' => Some(LocationId::B),
            'C' => Some(LocationId::C),
            'D' => Some(LocationId::D),
            _ => None,
        }
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for LocationId {
    type Err = GreenplanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let letter = trimmed.strip_prefix("位置").unwrap_or(trimmed);
        let mut chars = letter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_letter(c),
            _ => None,
        }
        .ok_or_else(|| GreenplanError::UnknownLocation { token: trimmed.to_string() })
    }
}

/// Environmental reading at a location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSample {
    /// Temperature in °C
    pub temperature: f64,

    /// Relative humidity in %
    pub humidity: f64,

    /// Illuminance in lux
    pub sunlight: f64,
}

impl EnvironmentSample {
    pub fn new(temperature: f64, humidity: f64, sunlight: f64) -> Self {
        Self { temperature, humidity, sunlight }
    }
}

/// Complete reference table of the four site locations
///
/// A table always holds a sample for every [`LocationId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<LocationId, EnvironmentSample>",
    into = "BTreeMap<LocationId, EnvironmentSample>"
)]
pub struct LocationTable {
    samples: [EnvironmentSample; 4],
}

impl LocationTable {
    /// Build a table from samples for A, B, C and D
    pub fn new(
        a: EnvironmentSample,
        b: EnvironmentSample,
        c: EnvironmentSample,
        d: EnvironmentSample,
    ) -> Self {
        Self { samples: [a, b, c, d] }
    }

    /// Reference readings of the default survey site
    pub fn reference() -> Self {
        Self::new(
            EnvironmentSample::new(27.0, 65.0, 600.0),
            EnvironmentSample::new(25.0, 55.0, 300.0),
            EnvironmentSample::new(28.0, 70.0, 450.0),
            EnvironmentSample::new(26.0, 60.0, 200.0),
        )
    }

    pub fn get(&self, id: LocationId) -> &EnvironmentSample {
        &self.samples[id as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (LocationId, &EnvironmentSample)> {
        LocationId::ALL.into_iter().zip(self.samples.iter())
    }

    /// Arithmetic mean over all four locations
    pub fn mean(&self) -> EnvironmentSample {
        let n = self.samples.len() as f64;
        EnvironmentSample {
            temperature: self.samples.iter().map(|s| s.temperature).sum::<f64>() / n,
            humidity: self.samples.iter().map(|s| s.humidity).sum::<f64>() / n,
            sunlight: self.samples.iter().map(|s| s.sunlight).sum::<f64>() / n,
        }
    }
}

impl TryFrom<BTreeMap<LocationId, EnvironmentSample>> for LocationTable {
    type Error = GreenplanError;

    fn try_from(map: BTreeMap<LocationId, EnvironmentSample>) -> Result<Self, Self::Error> {
        let missing: Vec<&str> =
            LocationId::ALL.iter().filter(|id| !map.contains_key(id)).map(|id| id.token()).collect();
        if !missing.is_empty() {
            return Err(GreenplanError::IncompleteLocationTable { missing: missing.join(", ") });
        }

        Ok(Self::new(
            map[&LocationId::A],
            map[&LocationId::B],
            map[&LocationId::C],
            map[&LocationId::D],
        ))
    }
}

impl From<LocationTable> for BTreeMap<LocationId, EnvironmentSample> {
    fn from(table: LocationTable) -> Self {
        table.iter().map(|(id, sample)| (id, *sample)).collect()
    }
}

/// Locations mentioned for each room type, in description order
pub type RoomLocations = BTreeMap<RoomType, Vec<LocationId>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location_id() {
        assert_eq!("位置A".parse::<LocationId>().unwrap(), LocationId::A);
        assert_eq!("c".parse::<LocationId>().unwrap(), LocationId::C);
        assert!("位置E".parse::<LocationId>().is_err());
        assert!("AB".parse::<LocationId>().is_err());
    }

    #[test]
    fn test_reference_mean() {
        let mean = LocationTable::reference().mean();
        assert!((mean.temperature - 26.5).abs() < 1e-9);
        assert!((mean.humidity - 62.5).abs() < 1e-9);
        assert!((mean.sunlight - 387.5).abs() < 1e-9);
    }

    #[test]
    fn test_table_round_trips_through_token_keys() {
        let json = serde_json::to_string(&LocationTable::reference()).unwrap();
        assert!(json.contains("\"位置A\""));
        let parsed: LocationTable = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, LocationTable::reference());
    }

    #[test]
    fn test_incomplete_table_is_rejected() {
        let json = r#"{"A": {"temperature": 20, "humidity": 50, "sunlight": 100}}"#;
        let err = serde_json::from_str::<LocationTable>(json).unwrap_err();
        assert!(err.to_string().contains("位置B"));
    }
}
