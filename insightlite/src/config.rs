// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Model service configuration
//!
//! Settings come from defaults, an optional JSON file and the environment, in
//! that order of increasing precedence. The API key is mandatory and is checked
//! by [`ModelConfig::validate`] before anything else runs.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the model service credential
pub const API_KEY_ENV: &str = "GROQ_API_KEY";
/// Environment variable overriding the model identifier
pub const MODEL_ENV: &str = "INSIGHTLITE_MODEL";
/// Environment variable overriding the service base URL
pub const BASE_URL_ENV: &str = "INSIGHTLITE_BASE_URL";
/// Environment variable overriding the request timeout (seconds)
pub const TIMEOUT_ENV: &str = "INSIGHTLITE_TIMEOUT_SECS";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not set; export your model service API key before starting")]
    MissingApiKey(&'static str),

    #[error("Cannot read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Bounded retry policy for transient model failures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Total attempts per call; 1 disables retrying
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            base_delay_ms: 250,
            max_delay_ms: 4_000,
        }
    }
}

/// Settings for the hosted chat-completion service
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Service credential; never serialized
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub retry: RetrySettings,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.1,
            max_tokens: 600,
            timeout_secs: 30,
            retry: RetrySettings::default(),
        }
    }
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .field("retry", &self.retry)
            .finish()
    }
}

impl ModelConfig {
    /// Defaults overlaid with the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Settings from a JSON file, then overlaid with the environment
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: ModelConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        config.apply_env()?;
        Ok(config)
    }

    /// Overlay environment variables onto the current settings
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(key) = env_value(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(model) = env_value(MODEL_ENV) {
            self.model = model;
        }
        if let Some(base_url) = env_value(BASE_URL_ENV) {
            self.base_url = base_url;
        }
        if let Some(timeout) = env_value(TIMEOUT_ENV) {
            self.timeout_secs = timeout.parse().map_err(|_| ConfigError::InvalidValue {
                name: TIMEOUT_ENV,
                value: timeout.clone(),
            })?;
        }
        Ok(())
    }

    /// Check the settings are usable; fails fast when the API key is missing
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => return Err(ConfigError::MissingApiKey(API_KEY_ENV)),
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "timeout_secs",
                value: "0".to_string(),
            });
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                name: "retry.max_attempts",
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        for name in [API_KEY_ENV, MODEL_ENV, BASE_URL_ENV, TIMEOUT_ENV] {
            std::env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn test_missing_key_fails_validation() {
        clear_env();
        let config = ModelConfig::from_env().unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(API_KEY_ENV)));
        assert!(err.to_string().contains("GROQ_API_KEY"));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        std::env::set_var(API_KEY_ENV, "secret");
        std::env::set_var(MODEL_ENV, "other-model");
        std::env::set_var(TIMEOUT_ENV, "5");

        let config = ModelConfig::from_env().unwrap();
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "other-model");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_bad_timeout_rejected() {
        clear_env();
        std::env::set_var(TIMEOUT_ENV, "soon");
        let err = ModelConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: TIMEOUT_ENV, .. }));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_file_then_env() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"model": "file-model", "max_tokens": 200, "retry": {{"max_attempts": 3}}}}"#
        )
        .unwrap();

        std::env::set_var(API_KEY_ENV, "from-env");
        let config = ModelConfig::from_file(file.path()).unwrap();
        assert_eq!(config.model, "file-model");
        assert_eq!(config.max_tokens, 200);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.base_delay_ms, 250);
        assert_eq!(config.temperature, 0.1);
        assert_eq!(config.api_key.as_deref(), Some("from-env"));
        clear_env();
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ModelConfig {
            api_key: Some("top-secret".into()),
            ..ModelConfig::default()
        };
        assert!(!format!("{:?}", config).contains("top-secret"));
    }
}
