//! GreenPlan Core - Domain models, configuration, and ports
//!
//! This crate contains the room-planning domain types and the port definitions
//! that collaborators (generators, stores) are reached through.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;

pub use error::{GreenplanError, Result};
