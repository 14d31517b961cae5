use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::RoomType;
use crate::error::{GreenplanError, Result};

/// Largest number of rooms accepted for a single room type
pub const MAX_ROOMS_PER_TYPE: u32 = 50;

/// Side of the footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl fmt::Display for WindowSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WindowSide::Top => "top",
            WindowSide::Right => "right",
            WindowSide::Bottom => "bottom",
            WindowSide::Left => "left",
        };
        f.write_str(name)
    }
}

impl FromStr for WindowSide {
    type Err = GreenplanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "top" | "north" | "n" => Ok(WindowSide::Top),
            "right" | "east" | "e" => Ok(WindowSide::Right),
            "bottom" | "south" | "s" => Ok(WindowSide::Bottom),
            "left" | "west" | "w" => Ok(WindowSide::Left),
            other => Err(GreenplanError::invalid_request(
                "windows",
                format!("unknown window side '{}': use top, right, bottom or left", other),
            )),
        }
    }
}

/// Which sides of the footprint have windows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Windows {
    #[serde(default)]
    pub top: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub bottom: bool,
    #[serde(default)]
    pub left: bool,
}

impl Windows {
    /// Windows on every side
    pub fn all() -> Self {
        Self { top: true, right: true, bottom: true, left: true }
    }

    /// Build from a list of sides
    pub fn from_sides(sides: &[WindowSide]) -> Self {
        let mut windows = Self::default();
        for side in sides {
            windows.set(*side, true);
        }
        windows
    }

    pub fn set(&mut self, side: WindowSide, open: bool) {
        match side {
            WindowSide::Top => self.top = open,
            WindowSide::Right => self.right = open,
            WindowSide::Bottom => self.bottom = open,
            WindowSide::Left => self.left = open,
        }
    }

    /// Number of sides with windows
    pub fn count(&self) -> usize {
        [self.top, self.right, self.bottom, self.left].iter().filter(|w| **w).count()
    }
}

/// A client's layout request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRequest {
    /// Design name
    #[serde(alias = "designName")]
    pub name: String,

    /// Footprint length in meters
    pub length: f64,

    /// Footprint width in meters
    pub width: f64,

    /// Requested number of rooms per type
    pub rooms: BTreeMap<RoomType, u32>,

    #[serde(default)]
    pub windows: Windows,

    /// Free-text wishes forwarded to the generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_request: Option<String>,
}

impl DesignRequest {
    pub fn new(name: impl Into<String>, length: f64, width: f64) -> Self {
        Self {
            name: name.into(),
            length,
            width,
            rooms: BTreeMap::new(),
            windows: Windows::default(),
            special_request: None,
        }
    }

    pub fn with_rooms(mut self, room_type: RoomType, count: u32) -> Self {
        self.rooms.insert(room_type, count);
        self
    }

    pub fn with_windows(mut self, windows: Windows) -> Self {
        self.windows = windows;
        self
    }

    pub fn with_special_request(mut self, request: impl Into<String>) -> Self {
        self.special_request = Some(request.into());
        self
    }

    /// Footprint area in square meters
    pub fn total_area(&self) -> f64 {
        self.length * self.width
    }

    /// Total number of requested rooms, saturating at `u32::MAX`
    pub fn room_count(&self) -> u32 {
        self.rooms.values().fold(0u32, |total, count| total.saturating_add(*count))
    }

    /// Check the request invariants
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(GreenplanError::invalid_request("name", "design name must not be empty"));
        }

        for (field, value) in [("length", self.length), ("width", self.width)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GreenplanError::invalid_request(
                    field,
                    format!("must be a positive number, got {}", value),
                ));
            }
        }

        if let Some((room, count)) =
            self.rooms.iter().find(|(_, count)| **count > MAX_ROOMS_PER_TYPE)
        {
            return Err(GreenplanError::invalid_request(
                "rooms",
                format!(
                    "{} rooms of type {} requested, at most {} are supported",
                    count, room, MAX_ROOMS_PER_TYPE
                ),
            ));
        }

        if self.room_count() == 0 {
            return Err(GreenplanError::invalid_request(
                "rooms",
                "at least one room type must have a positive count",
            ));
        }

        Ok(())
    }
}
