// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! OpenAI-compatible chat-completion client

use super::client::{CompletionClient, CompletionRequest, ModelError};
use crate::config::{ConfigError, ModelConfig};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Chat-completion request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat-completion response body
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Error response body
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Blocking client for an OpenAI-compatible `/chat/completions` endpoint
pub struct ChatCompletionClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout_secs: u64,
}

impl ChatCompletionClient {
    /// Build a client from validated configuration
    pub fn from_config(config: &ModelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let api_key = config
            .api_key
            .clone()
            .ok_or(ConfigError::MissingApiKey(crate::config::API_KEY_ENV))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                name: "http client",
                value: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn body<'a>(&'a self, request: &'a CompletionRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

impl CompletionClient for ChatCompletionClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError> {
        let started = Instant::now();

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.body(request))
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    ModelError::Connection(e.to_string())
                } else {
                    ModelError::Connection(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status().as_u16();
        let text = response.text().map_err(|e| {
            if e.is_timeout() {
                ModelError::Timeout(self.timeout_secs)
            } else {
                ModelError::InvalidResponse(e.to_string())
            }
        })?;

        log::debug!(
            "Model '{}' answered with HTTP {} in {} ms",
            self.model,
            status,
            started.elapsed().as_millis()
        );

        parse_response(status, &text)
    }
}

/// Map a status code and body to the completion text or a model error
fn parse_response(status: u16, body: &str) -> Result<String, ModelError> {
    match status {
        200..=299 => {
            let parsed: ChatResponse = serde_json::from_str(body)
                .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;
            let content = parsed
                .choices
                .into_iter()
                .next()
                .ok_or_else(|| ModelError::InvalidResponse("no choices returned".to_string()))?
                .message
                .content
                .unwrap_or_default();

            let content = content.trim();
            if content.is_empty() {
                Err(ModelError::EmptyCompletion)
            } else {
                Ok(content.to_string())
            }
        }
        429 => Err(ModelError::RateLimited),
        401 | 403 => Err(ModelError::Unauthorized(status)),
        _ => {
            let message = serde_json::from_str::<ErrorResponse>(body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| body.trim().to_string());
            Err(ModelError::Api { status, message })
        }
    }
}
