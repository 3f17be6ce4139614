use ps_config::RetryConfig;
use ps_core::{AiBackend, AiError, AiResult, GenerationOptions};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

/// Runtime form of [`RetryConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        if !config.enabled {
            return Self::single_attempt();
        }

        Self {
            max_attempts: config.effective_attempts(),
            initial_delay: Duration::from_millis(config.initial_delay_ms),
            max_delay: Duration::from_secs(config.max_delay_secs),
            backoff_multiplier: config.backoff_multiplier,
            jitter: config.jitter,
        }
    }
}

/// Execute an async operation with retry logic
pub async fn with_retry<F, Fut, T, E>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display + IsRetryable,
{
    let mut attempts = 0;
    let mut delay = policy.initial_delay;

    loop {
        attempts += 1;

        match operation().await {
            Ok(result) => {
                if attempts > 1 {
                    log::info!("{} succeeded after {} attempts", operation_name, attempts);
                }
                return Ok(result);
            }
            Err(e) => {
                if !e.is_retryable() || attempts >= policy.max_attempts {
                    if attempts > 1 {
                        log::warn!(
                            "{} failed after {} attempts: {}",
                            operation_name,
                            attempts,
                            e
                        );
                    }
                    return Err(e);
                }

                let actual_delay = if policy.jitter {
                    let jitter_factor = 0.5 + rand::random::<f64>(); // 0.5 to 1.5
                    Duration::from_secs_f64(delay.as_secs_f64() * jitter_factor)
                } else {
                    delay
                };

                log::debug!(
                    "{} attempt {} failed: {}. Retrying in {:?}",
                    operation_name,
                    attempts,
                    e,
                    actual_delay
                );

                sleep(actual_delay).await;

                delay = Duration::from_secs_f64(
                    (delay.as_secs_f64() * policy.backoff_multiplier)
                        .min(policy.max_delay.as_secs_f64()),
                );
            }
        }
    }
}

/// Trait for errors that can indicate retryability
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for AiError {
    fn is_retryable(&self) -> bool {
        AiError::is_retryable(self)
    }
}

/// [`AiBackend`] decorator that retries transient generation failures.
pub struct RetryingBackend {
    inner: Arc<dyn AiBackend>,
    policy: RetryPolicy,
}

impl RetryingBackend {
    pub fn new(inner: Arc<dyn AiBackend>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[async_trait]
impl AiBackend for RetryingBackend {
    async fn generate_text(&self, prompt: &str, options: &GenerationOptions) -> AiResult<String> {
        with_retry(&self.policy, "generate_text", || {
            self.inner.generate_text(prompt, options)
        })
        .await
    }

    async fn generate_image(&self, prompt: &str, options: &GenerationOptions) -> AiResult<String> {
        with_retry(&self.policy, "generate_image", || {
            self.inner.generate_image(prompt, options)
        })
        .await
    }

    async fn generate_embedding(&self, text: &str) -> AiResult<Vec<f32>> {
        with_retry(&self.policy, "generate_embedding", || {
            self.inner.generate_embedding(text)
        })
        .await
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }
}
