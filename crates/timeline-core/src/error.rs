use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// When a rate-limited request may be retried, as far as anyone knows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitHint {
    /// Remaining time on a client-side cool-down.
    pub retry_after: Option<Duration>,
    /// Reset instant reported by the remote service.
    pub reset_at: Option<DateTime<Utc>>,
}

impl RateLimitHint {
    pub fn retry_after(duration: Duration) -> Self {
        Self {
            retry_after: Some(duration),
            reset_at: None,
        }
    }

    pub fn reset_at(at: DateTime<Utc>) -> Self {
        Self {
            retry_after: None,
            reset_at: Some(at),
        }
    }
}

impl fmt::Display for RateLimitHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.retry_after, self.reset_at) {
            (Some(after), _) => write!(f, "retry in {}s", after.as_secs().max(1)),
            (None, Some(at)) => write!(f, "resets at {}", at.format("%H:%M:%S")),
            (None, None) => write!(f, "try again later"),
        }
    }
}

#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Rate limited, {0}")]
    RateLimited(RateLimitHint),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl TimelineError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited(_))
    }

    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}
