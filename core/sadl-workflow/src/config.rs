//! Coordinator configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Product code used when the form leaves it blank.
pub const DEFAULT_PRODUCT: &str = "SADL-PRO";

/// Activation server pre-filled in the form.
pub const DEFAULT_BASE_URL: &str = "http://www.omnicheck.co.za";

/// Shortest activation timeout honoured. Smaller values are raised to it.
pub const MIN_ACTIVATION_TIMEOUT_MS: u64 = 1_000;

/// Configuration for the workflow coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Activation server offered as the form default.
    pub base_url: String,
    /// Product code used when the product field is blank.
    pub default_product: String,
    /// License term used when the years field does not parse.
    pub default_years: u32,
    /// Maximum number of audit log entries kept.
    pub log_capacity: usize,
    /// Timeout for online activation (ms).
    pub activation_timeout_ms: u64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_product: DEFAULT_PRODUCT.to_string(),
            default_years: 1,
            log_capacity: 500,
            activation_timeout_ms: 30_000,
        }
    }
}

impl WorkflowConfig {
    /// Returns the activation timeout as a `Duration`, never shorter than
    /// [`MIN_ACTIVATION_TIMEOUT_MS`].
    #[must_use]
    pub fn activation_timeout(&self) -> Duration {
        Duration::from_millis(self.activation_timeout_ms.max(MIN_ACTIVATION_TIMEOUT_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_thirty_seconds() {
        assert_eq!(WorkflowConfig::default().activation_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn zero_timeout_is_raised_to_minimum() {
        let config = WorkflowConfig {
            activation_timeout_ms: 0,
            ..WorkflowConfig::default()
        };
        assert_eq!(config.activation_timeout(), Duration::from_secs(1));

        let config = WorkflowConfig {
            activation_timeout_ms: 250,
            ..WorkflowConfig::default()
        };
        assert_eq!(config.activation_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn large_timeout_is_kept() {
        let config = WorkflowConfig {
            activation_timeout_ms: u64::MAX,
            ..WorkflowConfig::default()
        };
        assert_eq!(config.activation_timeout(), Duration::from_millis(u64::MAX));
    }
}
