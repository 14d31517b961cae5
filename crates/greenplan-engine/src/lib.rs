//! GreenPlan Engine - Area allocation, environment targets and energy scoring
//!
//! This crate holds the deterministic core of the planner: it turns room
//! counts into areas, derives per-room environmental targets for a moment in
//! time, packs rooms into the footprint, reads room locations out of layout
//! descriptions and scores each candidate for energy efficiency.

pub mod allocation;
pub mod dimension;
pub mod environment;
pub mod extraction;
pub mod numeric;
pub mod resolution;
pub mod scoring;
pub mod validation;

pub use allocation::allocate_areas;
pub use dimension::{layout_for_allocation, optimize_layout, pack_layout, RoomSpec};
pub use environment::{adjust_for_conditions, rules_for};
pub use extraction::extract_room_locations;
pub use resolution::{resolve_samples, RoomSamples, SampleSet};
pub use scoring::{EnergyScorer, GradeThresholds};
pub use validation::{validate_layout, ConstraintLimits};
