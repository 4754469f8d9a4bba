//! Retry classification and backoff.

use std::time::Duration;

use aurum_client::ClientError;

use crate::EngineConfig;

/// What to do with a failed attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// Obtain a fresh reference point, rebuild, resubmit after `delay`.
    Retry { delay: Duration },
    /// Retrying cannot change the outcome.
    Fatal,
}

/// Exponential-backoff retry policy over the typed client errors.
///
/// Transient conditions (reference expiry, timeouts, not-yet-final,
/// transport blips) are retried with a doubling delay; everything the
/// ledger decided on its own state (funds, validity, authority) is fatal.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_backoff,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.max_attempts, config.base_backoff())
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Classify a failed attempt. `attempt` is 1-based and only sizes the
    /// backoff; the caller owns the attempt budget.
    pub fn classify(&self, error: &ClientError, attempt: u32) -> Disposition {
        match error {
            ClientError::ReferenceExpired
            | ClientError::Timeout(_)
            | ClientError::NotYetFinal
            | ClientError::Transport(_) => Disposition::Retry {
                delay: self.backoff(attempt),
            },
            ClientError::InsufficientFunds(_)
            | ClientError::InvalidInput(_)
            | ClientError::Unauthorized(_)
            | ClientError::Rejected(_)
            | ClientError::Rpc { .. }
            | ClientError::Decode(_) => Disposition::Fatal,
        }
    }

    /// Delay before attempt `attempt + 1`: base × 2^(attempt − 1).
    fn backoff(&self, attempt: u32) -> Duration {
        self.base_backoff
            .saturating_mul(1u32 << (attempt - 1).min(16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy::new(3, Duration::from_secs(2))
    }

    #[test]
    fn backoff_doubles() {
        let p = policy();
        assert_eq!(
            p.classify(&ClientError::ReferenceExpired, 1),
            Disposition::Retry {
                delay: Duration::from_secs(2)
            }
        );
        assert_eq!(
            p.classify(&ClientError::Timeout("poll".into()), 2),
            Disposition::Retry {
                delay: Duration::from_secs(4)
            }
        );
    }

    #[test]
    fn transient_stays_retryable_at_any_attempt() {
        assert!(matches!(
            policy().classify(&ClientError::ReferenceExpired, 3),
            Disposition::Retry { .. }
        ));
    }

    #[test]
    fn ledger_decisions_are_fatal() {
        let p = policy();
        for error in [
            ClientError::InsufficientFunds("fee".into()),
            ClientError::InvalidInput("uri".into()),
            ClientError::Unauthorized("owner mismatch".into()),
            ClientError::Rejected("non-zero balance".into()),
        ] {
            assert_eq!(p.classify(&error, 1), Disposition::Fatal);
        }
    }

    #[test]
    fn transport_blip_is_retryable() {
        assert!(matches!(
            policy().classify(&ClientError::Transport("connection reset".into()), 1),
            Disposition::Retry { .. }
        ));
    }
}
