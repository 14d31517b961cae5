use crate::ports::Generator;
use greenplan_core::error::Result;
use std::fs;
use std::path::Path;

/// Generator that always answers with the same text
///
/// Used for offline runs against a saved model response, and in tests.
#[derive(Debug, Clone)]
pub struct CannedGenerator {
    response: String,
}

impl CannedGenerator {
    pub fn new(response: impl Into<String>) -> Self {
        Self { response: response.into() }
    }

    /// Load the response from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let response = fs::read_to_string(path.as_ref())?;
        Ok(Self::new(response))
    }
}

impl Generator for CannedGenerator {
    fn generate(&self, _prompt: &str, _context: &[&str]) -> Result<String> {
        Ok(self.response.clone())
    }
}
