use greenplan_core::error::{GreenplanError, Result};
use greenplan_core::models::{AreaAllocation, RoomAllocation, RoomType};
use rand::Rng;
use std::collections::BTreeMap;

/// Upper bound on the combined ratio of all rooms
///
/// The remainder is left for walls and circulation.
pub const MAX_TOTAL_RATIO: f64 = 0.9;

/// Share of the `[min, max]` span a random draw may move a ratio by
const VARIATION_SPAN: f64 = 0.2;

/// Footprint share bounds of a single room of one type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioRule {
    pub min: f64,
    pub max: f64,
    pub ideal: f64,
}

pub fn ratio_rule(room_type: RoomType) -> RatioRule {
    match room_type {
        RoomType::LivingRoom => RatioRule { min: 0.25, max: 0.40, ideal: 0.30 },
        RoomType::Bedroom => RatioRule { min: 0.20, max: 0.40, ideal: 0.35 },
        RoomType::Kitchen => RatioRule { min: 0.08, max: 0.15, ideal: 0.12 },
        RoomType::Bathroom => RatioRule { min: 0.04, max: 0.08, ideal: 0.06 },
    }
}

/// Distribute `total_area` among the requested room types
///
/// Each type's ratio starts at `ideal * count`, moves by a random amount of
/// at most a tenth of the rule span per room and is clamped to the rule
/// bounds. When the ratios add up to more than [`MAX_TOTAL_RATIO`] they are
/// scaled down proportionally. Room types with a zero count are left out.
pub fn allocate_areas<R: Rng>(
    rooms: &BTreeMap<RoomType, u32>,
    total_area: f64,
    rng: &mut R,
) -> Result<AreaAllocation> {
    if !total_area.is_finite() || total_area <= 0.0 {
        return Err(GreenplanError::invalid_request(
            "area",
            format!("total area must be a positive number, got {}", total_area),
        ));
    }

    let mut ratios: Vec<(RoomType, u32, f64)> = rooms
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(room, count)| {
            let rule = ratio_rule(*room);
            let n = f64::from(*count);
            let base = rule.ideal * n;
            let variation = (rng.gen::<f64>() - 0.5) * (rule.max - rule.min) * VARIATION_SPAN * n;
            let ratio = (base + variation).clamp(rule.min * n, rule.max * n);
            (*room, *count, ratio)
        })
        .collect();

    if ratios.is_empty() {
        return Err(GreenplanError::invalid_request(
            "rooms",
            "at least one room type must have a positive count",
        ));
    }

    let ratio_sum: f64 = ratios.iter().map(|(_, _, ratio)| ratio).sum();
    if ratio_sum > MAX_TOTAL_RATIO {
        let scale = MAX_TOTAL_RATIO / ratio_sum;
        tracing::debug!(ratio_sum, scale, "Scaling room ratios down");
        for (_, _, ratio) in &mut ratios {
            *ratio *= scale;
        }
    }

    let rooms = ratios
        .into_iter()
        .map(|(room, count, ratio)| {
            let type_area = ratio * total_area;
            let allocation = RoomAllocation {
                count,
                ratio,
                total_area: type_area,
                unit_area: type_area / f64::from(count),
            };
            (room, allocation)
        })
        .collect();

    Ok(AreaAllocation { rooms })
}
