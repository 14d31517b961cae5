//! GreenPlan LLM - Text generation port and adapters
//!
//! This crate defines the port used to ask a language model for candidate
//! layouts, along with an Ollama adapter, a canned adapter for offline runs
//! and a retrying decorator.

pub mod canned;
pub mod ollama;
pub mod ports;
pub mod retry;

// Re-export main types
pub use canned::CannedGenerator;
pub use ollama::OllamaGenerator;
pub use ports::Generator;
pub use retry::RetryingGenerator;
