//! Room dimensions and footprint packing

use greenplan_core::models::{
    AreaAllocation, Footprint, RoomLayout, RoomPlacement, RoomType, UnplacedRoom,
};
use std::fmt::Write;

use crate::numeric::{round2, EPSILON};

/// Unused share of the footprint above which rooms are grown
const OPTIMIZE_TRIGGER: f64 = 0.05;

/// Unused share at which growing stops
const OPTIMIZE_TARGET: f64 = 0.01;

/// Length-over-width bounds of one room type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRule {
    pub min: f64,
    pub max: f64,
    pub ideal: f64,
}

pub fn aspect_rule(room_type: RoomType) -> AspectRule {
    match room_type {
        RoomType::LivingRoom => AspectRule { min: 1.2, max: 1.8, ideal: 1.5 },
        RoomType::Bedroom => AspectRule { min: 1.2, max: 1.6, ideal: 1.4 },
        RoomType::Kitchen => AspectRule { min: 1.0, max: 1.5, ideal: 1.3 },
        RoomType::Bathroom => AspectRule { min: 1.0, max: 1.3, ideal: 1.1 },
    }
}

/// Length and width of a room of `area` at the ideal aspect ratio
///
/// Both are rounded to centimeters.
pub fn dimensions_for(area: f64, room_type: RoomType) -> (f64, f64) {
    let aspect = aspect_rule(room_type).ideal;
    let width = (area / aspect).sqrt();
    let length = width * aspect;
    (round2(length), round2(width))
}

/// One room instance to be placed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomSpec {
    pub room_type: RoomType,

    /// 1-based index among rooms of the same type
    pub index: usize,

    pub area: f64,
}

impl RoomSpec {
    pub fn new(room_type: RoomType, index: usize, area: f64) -> Self {
        Self { room_type, index, area }
    }

    pub fn code(&self) -> String {
        self.room_type.instance_code(self.index)
    }
}

/// Greedily place rooms in caller order
///
/// Each room is clamped to the remaining length and width and placed at the
/// corner of the remaining space. Afterwards the longer remaining dimension
/// shrinks by the room's extent along it, or the width on a tie. Rooms left
/// without a positive extent go to [`RoomLayout::unplaced`].
pub fn pack_layout(rooms: &[RoomSpec], footprint: Footprint) -> RoomLayout {
    let mut layout = RoomLayout::new(footprint);
    let mut remaining_length = footprint.length;
    let mut remaining_width = footprint.width;

    for spec in rooms {
        let code = spec.code();
        if spec.area.is_nan() || spec.area <= EPSILON {
            tracing::warn!(room = %code, area = spec.area, "Room has no area, not placed");
            layout.unplaced.push(UnplacedRoom { room_type: spec.room_type, code, area: spec.area });
            continue;
        }

        let (ideal_length, ideal_width) = dimensions_for(spec.area, spec.room_type);
        let length = ideal_length.min(remaining_length);
        let width = ideal_width.min(remaining_width);

        if length <= EPSILON || width <= EPSILON {
            tracing::warn!(
                room = %code,
                remaining_length,
                remaining_width,
                "No space left in the footprint, room not placed"
            );
            layout.unplaced.push(UnplacedRoom { room_type: spec.room_type, code, area: spec.area });
            continue;
        }

        layout.placements.push(RoomPlacement {
            room_type: spec.room_type,
            index: spec.index,
            code,
            length,
            width,
            x: footprint.length - remaining_length,
            y: footprint.width - remaining_width,
        });

        if remaining_length > remaining_width {
            remaining_length -= length;
        } else {
            remaining_width -= width;
        }
    }

    layout
}

/// Pack, then grow rooms into significant unused space
///
/// When more than 5% of the footprint is unused, rooms are visited from the
/// largest down and stretched along their length, then their width, up to
/// the footprint edge, until at most 1% is unused.
pub fn optimize_layout(rooms: &[RoomSpec], footprint: Footprint) -> RoomLayout {
    let mut layout = pack_layout(rooms, footprint);
    let total_area = footprint.area();
    let mut unused = layout.unused_area();

    if unused <= total_area * OPTIMIZE_TRIGGER {
        return layout;
    }

    let mut order: Vec<usize> = (0..layout.placements.len()).collect();
    order.sort_by(|a, b| {
        layout.placements[*b].area().total_cmp(&layout.placements[*a].area())
    });

    for i in order {
        let placement = &mut layout.placements[i];

        let max_length = footprint.length - placement.x;
        if placement.length < max_length {
            let extra = (unused / placement.width).min(max_length - placement.length);
            placement.length += extra;
            unused -= extra * placement.width;
        }

        let max_width = footprint.width - placement.y;
        if placement.width < max_width {
            let extra = (unused / placement.length).min(max_width - placement.width);
            placement.width += extra;
            unused -= extra * placement.length;
        }

        if unused <= total_area * OPTIMIZE_TARGET {
            break;
        }
    }

    tracing::debug!(unused, "Optimized layout");
    layout
}

/// Expand an allocation into room instances and lay them out
///
/// Room types are placed in `order`; allocated types missing from `order`
/// follow in canonical order.
pub fn layout_for_allocation(
    allocation: &AreaAllocation,
    footprint: Footprint,
    order: &[RoomType],
    optimize: bool,
) -> RoomLayout {
    let mut types: Vec<RoomType> = Vec::with_capacity(allocation.rooms.len());
    for room in order.iter().chain(RoomType::ALL.iter()) {
        if allocation.get(*room).is_some() && !types.contains(room) {
            types.push(*room);
        }
    }

    let specs: Vec<RoomSpec> = types
        .into_iter()
        .filter_map(|room| allocation.get(room).map(|a| (room, a)))
        .flat_map(|(room, a)| {
            (1..=a.count as usize).map(move |index| RoomSpec::new(room, index, a.unit_area))
        })
        .collect();

    if optimize {
        optimize_layout(&specs, footprint)
    } else {
        pack_layout(&specs, footprint)
    }
}

/// Text digest of every placement
pub fn layout_summary(layout: &RoomLayout) -> String {
    let mut summary = String::from("Room layout:\n");
    for placement in &layout.placements {
        let _ = writeln!(summary, "{} ({}):", placement.code, placement.room_type);
        let _ = writeln!(summary, "  position: (x: {:.2}, y: {:.2})", placement.x, placement.y);
        let _ = writeln!(summary, "  size: {:.2}m x {:.2}m", placement.length, placement.width);
        let _ = writeln!(summary, "  area: {:.2} m²", placement.area());
    }
    for room in &layout.unplaced {
        let _ = writeln!(
            summary,
            "{} ({}): not placed, {:.2} m² requested",
            room.code, room.room_type, room.area
        );
    }
    summary
}
