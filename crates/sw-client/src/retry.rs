//! Retry policy with exponential backoff and jitter.
//!
//! The default policy makes at most 5 attempts per call. The delay before
//! retry `n` starts at 2s, doubles each time, gets up to the same amount again
//! as random jitter and never exceeds 60s.

use rand::Rng;
use std::time::Duration;

/// Total attempts per call, including the first one.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first request.
    pub max_attempts: u32,
    /// Delay before the first retry (before jitter).
    pub initial_delay: Duration,
    /// Maximum delay between attempts.
    pub max_delay: Duration,
    /// Backoff strategy to use.
    pub backoff: BackoffStrategy,
    /// Whether to respect Retry-After headers on 429 responses.
    pub respect_retry_after: bool,
    /// Maximum time to wait from Retry-After header.
    pub max_retry_after: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(60),
            backoff: BackoffStrategy::ExponentialWithJitter { factor: 2.0 },
            respect_retry_after: true,
            max_retry_after: Duration::from_secs(60),
        }
    }
}

impl RetryConfig {
    /// Set the maximum number of attempts.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the delay before the first retry.
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the max delay between attempts.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the backoff strategy.
    pub fn with_backoff(mut self, backoff: BackoffStrategy) -> Self {
        self.backoff = backoff;
        self
    }

    /// A single attempt, no retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }
}

/// Backoff strategy for determining retry delays.
#[derive(Debug, Clone, Copy)]
pub enum BackoffStrategy {
    /// Constant delay between retries.
    Constant,
    /// Linear increase in delay (delay * attempt).
    Linear,
    /// Exponential increase in delay (delay * factor^attempt).
    Exponential { factor: f64 },
    /// Exponential with up to 100% random jitter added on top.
    ExponentialWithJitter { factor: f64 },
}

impl BackoffStrategy {
    /// Calculate the delay for a given retry number (0-indexed).
    ///
    /// Growth is clamped to `max_delay` in floating point before a `Duration`
    /// is built, so any retry number is safe.
    pub fn delay(&self, attempt: u32, initial_delay: Duration, max_delay: Duration) -> Duration {
        let cap = max_delay.as_secs_f64();
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);

        let delay = match self {
            BackoffStrategy::Constant => initial_delay,
            BackoffStrategy::Linear => initial_delay.saturating_mul(attempt.saturating_add(1)),
            BackoffStrategy::Exponential { factor } => {
                let base_delay = initial_delay.as_secs_f64() * factor.powi(exponent);
                Duration::from_secs_f64(base_delay.min(cap))
            }
            BackoffStrategy::ExponentialWithJitter { factor } => {
                let base_delay = (initial_delay.as_secs_f64() * factor.powi(exponent)).min(cap);

                // Jitter in [0, base_delay]: retry n always waits at least as
                // long as the upper bound of retry n-1 when factor >= 2.
                let jitter = rand::rng().random::<f64>() * base_delay;

                Duration::from_secs_f64((base_delay + jitter).min(cap))
            }
        };

        std::cmp::min(delay, max_delay)
    }
}

/// Retry policy that tracks attempts for a single call.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
    attempt: u32,
}

impl RetryPolicy {
    /// Create a new retry policy from config.
    pub fn new(config: RetryConfig) -> Self {
        Self { config, attempt: 0 }
    }

    /// Number of requests sent so far, assuming the first one has been made.
    pub fn attempts_made(&self) -> u32 {
        self.attempt + 1
    }

    /// Returns true if another attempt is allowed after a failure.
    pub fn should_retry(&self) -> bool {
        self.attempts_made() < self.config.max_attempts
    }

    /// Record a failed attempt and return the delay before the next one.
    /// Returns None once the attempt budget is spent.
    pub fn next_delay(&mut self, retry_after: Option<Duration>) -> Option<Duration> {
        if !self.should_retry() {
            return None;
        }

        let delay = match retry_after {
            Some(retry_after) if self.config.respect_retry_after => {
                std::cmp::min(retry_after, self.config.max_retry_after)
            }
            _ => self.config.backoff.delay(
                self.attempt,
                self.config.initial_delay,
                self.config.max_delay,
            ),
        };

        self.attempt += 1;
        Some(delay)
    }
}
