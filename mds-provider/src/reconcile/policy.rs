use std::time::Duration;

/// Pacing and bounds of one reconciliation.
#[derive(Clone, Debug, PartialEq)]
pub struct PollPolicy {
    /// Wait before the first poll.
    pub initial_interval: Duration,
    /// Upper bound for any single wait.
    pub max_interval: Duration,
    /// Growth factor between waits. 1.0 keeps a fixed interval.
    pub multiplier: f64,
    /// Total time allowed, measured from the start of the lifecycle call.
    pub timeout: Duration,
    /// Optional cap on the number of polls.
    pub max_attempts: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::fixed(Duration::from_secs(10), Duration::from_secs(30 * 60))
    }
}

impl PollPolicy {
    /// Polls every `interval` until `timeout` has passed.
    pub fn fixed(interval: Duration, timeout: Duration) -> Self {
        Self {
            initial_interval: interval,
            max_interval: interval,
            multiplier: 1.0,
            timeout,
            max_attempts: None,
        }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    pub fn with_max_attempts(self, max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            ..self
        }
    }

    /// Exponential growth from the initial interval, capped at `max_interval`.
    pub fn with_backoff(self, multiplier: f64, max_interval: Duration) -> Self {
        Self {
            multiplier,
            max_interval,
            ..self
        }
    }

    /// Wait before poll number `attempt` (zero-based).
    pub fn interval(&self, attempt: u32) -> Duration {
        let interval =
            self.initial_interval.as_millis() as f64 * self.multiplier.powi(attempt as i32);
        let interval_ms = interval.min(self.max_interval.as_millis() as f64) as u64;

        Duration::from_millis(interval_ms)
    }

    pub fn attempts_exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_fixed_ten_seconds() {
        let policy = PollPolicy::default();
        assert_eq!(policy.interval(0), Duration::from_secs(10));
        assert_eq!(policy.interval(50), Duration::from_secs(10));
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let policy = PollPolicy::fixed(Duration::from_secs(1), Duration::from_secs(60))
            .with_backoff(2.0, Duration::from_secs(5));

        assert_eq!(policy.interval(0), Duration::from_secs(1));
        assert_eq!(policy.interval(2), Duration::from_secs(4));
        assert_eq!(policy.interval(3), Duration::from_secs(5));
    }

    #[test]
    fn test_max_attempts() {
        let policy = PollPolicy::default().with_max_attempts(3);
        assert!(!policy.attempts_exhausted(2));
        assert!(policy.attempts_exhausted(3));
        assert!(!PollPolicy::default().attempts_exhausted(u32::MAX));
    }
}
