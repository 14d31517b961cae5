use greenplan_core::models::{AreaAllocation, ConstraintReport, RoomLayout};

/// Soft limits a layout is checked against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintLimits {
    /// Smallest acceptable single-room area in m²
    pub min_room_size: f64,

    /// Largest acceptable long-side over short-side ratio
    pub max_aspect_ratio: f64,
}

impl Default for ConstraintLimits {
    fn default() -> Self {
        Self { min_room_size: 5.0, max_aspect_ratio: 2.0 }
    }
}

/// Check single-room areas against the minimum size
pub fn validate_room_sizes(allocation: &AreaAllocation, min_room_size: f64) -> ConstraintReport {
    let mut report = ConstraintReport::valid();

    for (room, a) in &allocation.rooms {
        if a.unit_area < min_room_size {
            report.add_violation(
                room.to_string(),
                format!(
                    "Room area {:.2} m² is below the minimum of {:.2} m²",
                    a.unit_area, min_room_size
                ),
            );
        }
    }

    report
}

/// Check every placement's aspect ratio and flag rooms left unplaced
pub fn validate_aspect_ratios(layout: &RoomLayout, max_aspect_ratio: f64) -> ConstraintReport {
    let mut report = ConstraintReport::valid();

    for placement in &layout.placements {
        let ratio = placement.aspect_ratio();
        if ratio > max_aspect_ratio {
            report.add_violation(
                placement.code.clone(),
                format!("Aspect ratio {:.2} exceeds the maximum of {:.2}", ratio, max_aspect_ratio),
            );
        }
    }

    for room in &layout.unplaced {
        report.add_violation(
            room.code.clone(),
            format!("No space left in the footprint for {:.2} m²", room.area),
        );
    }

    report
}

/// Run all soft-constraint checks
///
/// Violations are reported, never enforced.
pub fn validate_layout(
    allocation: &AreaAllocation,
    layout: &RoomLayout,
    limits: &ConstraintLimits,
) -> ConstraintReport {
    let mut report = validate_room_sizes(allocation, limits.min_room_size);
    report.merge(validate_aspect_ratios(layout, limits.max_aspect_ratio));

    if !report.is_valid {
        tracing::debug!(violations = report.violations.len(), "Layout violates soft constraints");
    }

    report
}
