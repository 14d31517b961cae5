use crate::error::{GreenplanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for GreenPlan
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub generator_url: ConfigValue<String>,
    pub generator_model: ConfigValue<String>,
    pub candidate_count: ConfigValue<usize>,
    pub max_attempts: ConfigValue<u32>,
    pub retry_delay_secs: ConfigValue<u64>,
    pub min_room_size: ConfigValue<f64>,
    pub max_aspect_ratio: ConfigValue<f64>,
    pub output_dir: ConfigValue<PathBuf>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            generator_url: ConfigValue::new(
                "http://localhost:11434".to_string(),
                ConfigSource::Default,
            ),
            generator_model: ConfigValue::new("llama3".to_string(), ConfigSource::Default),
            candidate_count: ConfigValue::new(3, ConfigSource::Default),
            max_attempts: ConfigValue::new(3, ConfigSource::Default),
            retry_delay_secs: ConfigValue::new(5, ConfigSource::Default),
            min_room_size: ConfigValue::new(5.0, ConfigSource::Default),
            max_aspect_ratio: ConfigValue::new(2.0, ConfigSource::Default),
            output_dir: ConfigValue::new(PathBuf::from("design_results"), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GreenplanError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GreenplanError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(url) = file_config.generator_url {
            self.generator_url.update(url, ConfigSource::File);
        }

        if let Some(model) = file_config.generator_model {
            self.generator_model.update(model, ConfigSource::File);
        }

        if let Some(count) = file_config.candidate_count {
            self.candidate_count.update(validate_candidate_count(count)?, ConfigSource::File);
        }

        if let Some(attempts) = file_config.max_attempts {
            self.max_attempts.update(validate_max_attempts(attempts)?, ConfigSource::File);
        }

        if let Some(delay) = file_config.retry_delay_secs {
            self.retry_delay_secs.update(delay, ConfigSource::File);
        }

        if let Some(size) = file_config.min_room_size {
            self.min_room_size.update(validate_positive("min_room_size", size)?, ConfigSource::File);
        }

        if let Some(ratio) = file_config.max_aspect_ratio {
            self.max_aspect_ratio
                .update(validate_aspect_ratio(ratio)?, ConfigSource::File);
        }

        if let Some(dir) = file_config.output_dir {
            self.output_dir.update(dir, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // GREENPLAN_GENERATOR_URL
        if let Ok(url) = env::var("GREENPLAN_GENERATOR_URL") {
            self.generator_url.update(url, ConfigSource::Environment);
        }

        // GREENPLAN_GENERATOR_MODEL
        if let Ok(model) = env::var("GREENPLAN_GENERATOR_MODEL") {
            self.generator_model.update(model, ConfigSource::Environment);
        }

        // GREENPLAN_CANDIDATE_COUNT
        if let Some(count) = env_parsed("GREENPLAN_CANDIDATE_COUNT", validate_candidate_count) {
            self.candidate_count.update(count, ConfigSource::Environment);
        }

        // GREENPLAN_MAX_ATTEMPTS
        if let Some(attempts) = env_parsed("GREENPLAN_MAX_ATTEMPTS", validate_max_attempts) {
            self.max_attempts.update(attempts, ConfigSource::Environment);
        }

        // GREENPLAN_RETRY_DELAY_SECS
        if let Some(delay) = env_parsed("GREENPLAN_RETRY_DELAY_SECS", Ok) {
            self.retry_delay_secs.update(delay, ConfigSource::Environment);
        }

        // GREENPLAN_MIN_ROOM_SIZE
        if let Some(size) =
            env_parsed("GREENPLAN_MIN_ROOM_SIZE", |v| validate_positive("min_room_size", v))
        {
            self.min_room_size.update(size, ConfigSource::Environment);
        }

        // GREENPLAN_MAX_ASPECT_RATIO
        if let Some(ratio) = env_parsed("GREENPLAN_MAX_ASPECT_RATIO", validate_aspect_ratio) {
            self.max_aspect_ratio.update(ratio, ConfigSource::Environment);
        }

        // GREENPLAN_OUTPUT_DIR
        if let Ok(dir) = env::var("GREENPLAN_OUTPUT_DIR") {
            self.output_dir.update(PathBuf::from(dir), ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(url) = overrides.generator_url {
            self.generator_url.update(url, ConfigSource::Cli);
        }

        if let Some(model) = overrides.generator_model {
            self.generator_model.update(model, ConfigSource::Cli);
        }

        if let Some(count) = overrides.candidate_count {
            self.candidate_count.update(count, ConfigSource::Cli);
        }

        if let Some(dir) = overrides.output_dir {
            self.output_dir.update(dir, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "generator_url".to_string(),
            (self.generator_url.value.clone(), self.generator_url.source),
        );
        map.insert(
            "generator_model".to_string(),
            (self.generator_model.value.clone(), self.generator_model.source),
        );
        map.insert(
            "candidate_count".to_string(),
            (self.candidate_count.value.to_string(), self.candidate_count.source),
        );
        map.insert(
            "max_attempts".to_string(),
            (self.max_attempts.value.to_string(), self.max_attempts.source),
        );
        map.insert(
            "retry_delay_secs".to_string(),
            (format!("{}s", self.retry_delay_secs.value), self.retry_delay_secs.source),
        );
        map.insert(
            "min_room_size".to_string(),
            (format!("{} m²", self.min_room_size.value), self.min_room_size.source),
        );
        map.insert(
            "max_aspect_ratio".to_string(),
            (self.max_aspect_ratio.value.to_string(), self.max_aspect_ratio.source),
        );
        map.insert(
            "output_dir".to_string(),
            (self.output_dir.value.display().to_string(), self.output_dir.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    generator_url: Option<String>,
    generator_model: Option<String>,
    candidate_count: Option<usize>,
    max_attempts: Option<u32>,
    retry_delay_secs: Option<u64>,
    min_room_size: Option<f64>,
    max_aspect_ratio: Option<f64>,
    output_dir: Option<PathBuf>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub generator_url: Option<String>,
    pub generator_model: Option<String>,
    pub candidate_count: Option<usize>,
    pub output_dir: Option<PathBuf>,
}

/// Read and validate an environment variable, warning on bad values
fn env_parsed<T, F>(key: &str, validate: F) -> Option<T>
where
    T: FromStr,
    F: Fn(T) -> Result<T>,
{
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => match validate(value) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring {}='{}': {}", key, raw, e);
                None
            }
        },
        Err(_) => {
            tracing::warn!("Invalid {} value '{}': expected a number", key, raw);
            None
        }
    }
}

/// Candidate count must lie in 1..=10
pub fn validate_candidate_count(count: usize) -> Result<usize> {
    if (1..=10).contains(&count) {
        Ok(count)
    } else {
        Err(GreenplanError::ConfigInvalid {
            key: "candidate_count".to_string(),
            reason: format!("expected 1 to 10 candidates, got {}", count),
        })
    }
}

/// At least one generator attempt is required
pub fn validate_max_attempts(attempts: u32) -> Result<u32> {
    if attempts == 0 {
        return Err(GreenplanError::ConfigInvalid {
            key: "max_attempts".to_string(),
            reason: "at least one attempt is required".to_string(),
        });
    }
    Ok(attempts)
}

fn validate_positive(key: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GreenplanError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("must be a positive number, got {}", value),
        })
    }
}

/// Aspect ratios are long side over short side, so never below 1
pub fn validate_aspect_ratio(ratio: f64) -> Result<f64> {
    if ratio.is_finite() && ratio >= 1.0 {
        Ok(ratio)
    } else {
        Err(GreenplanError::ConfigInvalid {
            key: "max_aspect_ratio".to_string(),
            reason: format!("must be at least 1.0, got {}", ratio),
        })
    }
}
