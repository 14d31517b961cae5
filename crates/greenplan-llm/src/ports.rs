//! LLM port definitions

use greenplan_core::error::Result;

/// Port for text generation
pub trait Generator: Send + Sync {
    /// Generate text based on a prompt and optional context
    ///
    /// # Arguments
    /// * `prompt` - The generation prompt
    /// * `context` - Optional context strings to ground the generation
    ///
    /// # Returns
    /// Generated text string
    fn generate(&self, prompt: &str, context: &[&str]) -> Result<String>;
}

impl<G: Generator + ?Sized> Generator for &G {
    fn generate(&self, prompt: &str, context: &[&str]) -> Result<String> {
        (**self).generate(prompt, context)
    }
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    fn generate(&self, prompt: &str, context: &[&str]) -> Result<String> {
        (**self).generate(prompt, context)
    }
}
