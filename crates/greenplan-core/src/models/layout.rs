use serde::{Deserialize, Serialize};

use super::RoomType;

/// Rectangular footprint of the dwelling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub length: f64,
    pub width: f64,
}

impl Footprint {
    pub fn new(length: f64, width: f64) -> Self {
        Self { length, width }
    }

    pub fn area(&self) -> f64 {
        self.length * self.width
    }
}

/// A placed room instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomPlacement {
    pub room_type: RoomType,

    /// 1-based index among rooms of the same type
    pub index: usize,

    /// Instance code such as `BR02`
    pub code: String,

    /// Extent along the footprint length
    pub length: f64,

    /// Extent along the footprint width
    pub width: f64,

    pub x: f64,
    pub y: f64,
}

impl RoomPlacement {
    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// Long side over short side
    pub fn aspect_ratio(&self) -> f64 {
        let long = self.length.max(self.width);
        let short = self.length.min(self.width);
        long / short
    }

    /// Whether the bounding box lies inside `footprint`, within `tolerance`
    pub fn fits_within(&self, footprint: &Footprint, tolerance: f64) -> bool {
        self.x >= -tolerance
            && self.y >= -tolerance
            && self.x + self.length <= footprint.length + tolerance
            && self.y + self.width <= footprint.width + tolerance
    }
}

/// A room that could not be given positive extents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnplacedRoom {
    pub room_type: RoomType,
    pub code: String,
    pub area: f64,
}

/// Placements of all room instances in a footprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomLayout {
    pub footprint: Footprint,
    pub placements: Vec<RoomPlacement>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unplaced: Vec<UnplacedRoom>,
}

impl RoomLayout {
    pub fn new(footprint: Footprint) -> Self {
        Self { footprint, placements: Vec::new(), unplaced: Vec::new() }
    }

    /// Sum of placement areas
    pub fn used_area(&self) -> f64 {
        self.placements.iter().map(RoomPlacement::area).sum()
    }

    /// Footprint area not covered by the placement areas
    pub fn unused_area(&self) -> f64 {
        self.footprint.area() - self.used_area()
    }

    /// Placements of one room type
    pub fn rooms_of(&self, room_type: RoomType) -> impl Iterator<Item = &RoomPlacement> {
        self.placements.iter().filter(move |p| p.room_type == room_type)
    }
}

/// A soft constraint a room does not meet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    /// Room type or instance code
    pub location: String,
    pub reason: String,
}

/// Outcome of the soft-constraint checks
///
/// Violations are advisory and never block a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintReport {
    pub is_valid: bool,
    pub violations: Vec<ConstraintViolation>,
}

impl ConstraintReport {
    pub fn valid() -> Self {
        Self { is_valid: true, violations: Vec::new() }
    }

    pub fn add_violation(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.violations.push(ConstraintViolation { location, reason });
    }

    /// Append the violations of another report
    pub fn merge(&mut self, other: ConstraintReport) {
        for violation in other.violations {
            self.add_violation(violation.location, violation.reason);
        }
    }
}

impl Default for ConstraintReport {
    fn default() -> Self {
        Self::valid()
    }
}
