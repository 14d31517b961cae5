use crate::ports::Generator;
use greenplan_core::error::{GreenplanError, Result};
use serde::{Deserialize, Serialize};

/// Persona the model answers as
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a senior architect specialising in \
     space planning and energy-efficient residential design. You answer with valid JSON only.";

/// Ollama generator implementation
pub struct OllamaGenerator {
    /// Base URL for Ollama API (e.g., "http://localhost:11434")
    base_url: String,

    /// Model name to use for generation
    model: String,

    /// System prompt sent with every request
    system: Option<String>,

    /// HTTP client
    client: reqwest::Client,
}

impl OllamaGenerator {
    /// Create a new Ollama generator
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            system: Some(DEFAULT_SYSTEM_PROMPT.to_string()),
            client: reqwest::Client::new(),
        }
    }

    /// Create with default localhost URL
    pub fn localhost(model: impl Into<String>) -> Self {
        Self::new("http://localhost:11434", model)
    }

    /// Replace the system prompt, or send none
    pub fn with_system(mut self, system: Option<String>) -> Self {
        self.system = system;
        self
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    fn request_body(&self, prompt: &str, context: &[&str]) -> OllamaGenerateRequest {
        let prompt = if context.is_empty() {
            prompt.to_string()
        } else {
            format!("{}\n\n{}", context.join("\n\n"), prompt)
        };

        OllamaGenerateRequest {
            model: self.model.clone(),
            prompt,
            system: self.system.clone(),
            stream: false,
        }
    }
}

impl Generator for OllamaGenerator {
    fn generate(&self, prompt: &str, context: &[&str]) -> Result<String> {
        // Use tokio runtime to execute async request
        let runtime =
            tokio::runtime::Runtime::new().map_err(|e| GreenplanError::GeneratorUnavailable {
                reason: format!("Failed to create async runtime: {}", e),
                remediation: "Ensure tokio is properly configured".to_string(),
            })?;

        let request = self.request_body(prompt, context);
        tracing::debug!(
            model = %self.model,
            prompt_len = request.prompt.len(),
            "Sending generate request"
        );

        runtime.block_on(async {
            let response = self
                .client
                .post(format!("{}/api/generate", self.base_url))
                .json(&request)
                .send()
                .await
                .map_err(|e| GreenplanError::GeneratorUnavailable {
                    reason: format!("Failed to connect to Ollama: {}", e),
                    remediation: format!(
                        "Ensure Ollama is running at {} and the model '{}' is available. \
                         Run 'ollama pull {}' to download the model.",
                        self.base_url, self.model, self.model
                    ),
                })?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response.text().await.unwrap_or_default();
                return Err(GreenplanError::GeneratorUnavailable {
                    reason: format!("Ollama API error ({}): {}", status, error_text),
                    remediation: format!(
                        "Check that the model '{}' is available. Run 'ollama list' to see installed models.",
                        self.model
                    ),
                });
            }

            let generate_response: OllamaGenerateResponse =
                response.json().await.map_err(|e| GreenplanError::MalformedResponse {
                    reason: format!("Failed to parse Ollama response: {}", e),
                })?;

            Ok(generate_response.response)
        })
    }
}

/// Request body for Ollama generate API
#[derive(Debug, Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    stream: bool,
}

/// Response from Ollama generate API
#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}
