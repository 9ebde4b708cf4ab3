//! Bounded waiting for run completion.

use config::PollingConfig;
use std::time::Duration;

/// How often and how long to poll a run before giving up.
#[derive(Debug, Clone, PartialEq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub multiplier: f64
}

impl PollPolicy {
    /// Delay before poll number `attempt` (1-based): exponential growth from
    /// the initial interval, clamped to the maximum.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let delay_ms = self.initial_interval.as_millis() as f64 * self.multiplier.powi(exponent);
        let clamped_ms = delay_ms.min(self.max_interval.as_millis() as f64);
        Duration::from_millis(clamped_ms as u64)
    }

    /// Policy with no waiting, for tests against a local server.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_interval: Duration::ZERO,
            max_interval: Duration::ZERO,
            multiplier: 1.0
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::from(&PollingConfig::default())
    }
}

impl From<&PollingConfig> for PollPolicy {
    fn from(config: &PollingConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            initial_interval: Duration::from_millis(config.initial_interval_ms),
            max_interval: Duration::from_millis(config.max_interval_ms),
            multiplier: config.multiplier
        }
    }
}
