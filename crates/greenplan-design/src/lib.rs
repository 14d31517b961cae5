//! GreenPlan Design - Orchestration of a design run
//!
//! Ties the engine, the text generator and a design store together: a
//! request goes in, a scored set of candidate configurations comes out.

pub mod orchestrator;
pub mod prompt;
pub mod response;

pub use orchestrator::{room_order, DesignOrchestrator, DesignSettings};
pub use prompt::build_prompt;
pub use response::parse_configurations;
