// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Bounded retry for transient model failures

use super::client::{CompletionClient, CompletionRequest, ModelError};
use crate::config::RetrySettings;
use std::time::Duration;

/// Upper bound of the random jitter added to every delay
const MAX_JITTER_MS: u64 = 250;

/// Calculate the delay before retry number `attempt` (1-based) with exponential backoff
pub fn next_retry_delay(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    let multiplier = 2_u64.saturating_pow(attempt.saturating_sub(1));
    let delay = base_ms.saturating_mul(multiplier);
    let jitter = fastrand::u64(0..=MAX_JITTER_MS);
    Duration::from_millis(delay.saturating_add(jitter).min(max_ms))
}

/// Wraps a client and retries transient failures up to a fixed number of attempts
///
/// Non-transient errors (bad credentials, unreadable responses) are returned
/// immediately. With `max_attempts == 1` this is a plain pass-through.
pub struct RetryingClient<C> {
    inner: C,
    settings: RetrySettings,
}

impl<C: CompletionClient> RetryingClient<C> {
    pub fn new(inner: C, settings: RetrySettings) -> Self {
        Self { inner, settings }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: CompletionClient> CompletionClient for RetryingClient<C> {
    fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError> {
        let max_attempts = self.settings.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.inner.complete(request) {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() && attempt < max_attempts => {
                    let delay = next_retry_delay(
                        attempt,
                        self.settings.base_delay_ms,
                        self.settings.max_delay_ms,
                    );
                    log::warn!(
                        "Model call failed. Retrying in {:?} (Attempt {}/{}): {}",
                        delay,
                        attempt,
                        max_attempts,
                        e
                    );
                    std::thread::sleep(delay);
                }
                Err(e) => {
                    if attempt > 1 {
                        log::error!("Model call failed after {} attempts: {}", attempt, e);
                    }
                    return Err(e);
                }
            }
        }
    }
}
