//! Poller configuration
//!
//! Defines the polling cadence, the per-request timeout and how transport
//! failures are treated.

use anyhow::Context;
use std::time::Duration;

/// Default interval between status requests
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(2000);

/// Default limit for a single status request
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Poller configuration
///
/// All intervals are configurable to allow tuning for different deployment
/// scenarios (local backend vs. slow networks).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// Time between status requests. The first request waits one interval.
    pub interval: Duration,

    /// Maximum time a single status request may take. `None` waits forever.
    pub fetch_timeout: Option<Duration>,

    /// How many consecutive transport errors are retried before the session
    /// fails. Zero makes the first transport error fatal.
    pub transport_retries: u32,

    /// Upper bound for the retry backoff
    pub max_backoff: Duration,
}

impl PollConfig {
    /// Creates a new configuration with defaults
    pub fn new() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            fetch_timeout: Some(DEFAULT_FETCH_TIMEOUT),
            transport_retries: 0,
            max_backoff: Duration::from_secs(30),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - GENCERTIFY_POLL_INTERVAL_MS (optional, default: 2000)
    /// - GENCERTIFY_FETCH_TIMEOUT_MS (optional, default: 30000, 0 disables)
    /// - GENCERTIFY_TRANSPORT_RETRIES (optional, default: 0)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::new();

        if let Some(ms) = parse_var::<u64>(&lookup, "GENCERTIFY_POLL_INTERVAL_MS")? {
            config.interval = Duration::from_millis(ms);
        }

        if let Some(ms) = parse_var::<u64>(&lookup, "GENCERTIFY_FETCH_TIMEOUT_MS")? {
            config.fetch_timeout = (ms > 0).then(|| Duration::from_millis(ms));
        }

        if let Some(retries) = parse_var::<u32>(&lookup, "GENCERTIFY_TRANSPORT_RETRIES")? {
            config.transport_retries = retries;
        }

        Ok(config)
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_transport_retries(mut self, retries: u32) -> Self {
        self.transport_retries = retries;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.interval.is_zero() {
            anyhow::bail!("poll interval must be greater than 0");
        }

        if self.fetch_timeout.is_some_and(|t| t.is_zero()) {
            anyhow::bail!("fetch timeout must be greater than 0 when set");
        }

        if self.max_backoff.is_zero() {
            anyhow::bail!("max_backoff must be greater than 0");
        }

        Ok(())
    }

    /// Delay before the retry following the given consecutive failure (1-based)
    ///
    /// Starts at the poll interval and doubles, capped at `max_backoff`.
    pub fn backoff_delay(&self, failure: u32) -> Duration {
        let factor = 2u32.saturating_pow(failure.saturating_sub(1));
        self.interval
            .checked_mul(factor)
            .unwrap_or(self.max_backoff)
            .min(self.max_backoff)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("invalid value for {}: {:?}", key, raw))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = PollConfig::default();
        assert_eq!(config.interval, Duration::from_millis(2000));
        assert_eq!(config.fetch_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.transport_retries, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_vars() {
        let config = PollConfig::from_lookup(lookup_from(&[
            ("GENCERTIFY_POLL_INTERVAL_MS", "500"),
            ("GENCERTIFY_FETCH_TIMEOUT_MS", "0"),
            ("GENCERTIFY_TRANSPORT_RETRIES", "3"),
        ]))
        .unwrap();

        assert_eq!(config.interval, Duration::from_millis(500));
        assert_eq!(config.fetch_timeout, None);
        assert_eq!(config.transport_retries, 3);
    }

    #[test]
    fn test_config_rejects_garbage() {
        let result = PollConfig::from_lookup(lookup_from(&[("GENCERTIFY_POLL_INTERVAL_MS", "fast")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = PollConfig::default();
        assert!(config.validate().is_ok());

        config.interval = Duration::ZERO;
        assert!(config.validate().is_err());

        config.interval = Duration::from_secs(1);
        config.fetch_timeout = Some(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let config = PollConfig::default();
        assert_eq!(config.backoff_delay(1), Duration::from_secs(2));
        assert_eq!(config.backoff_delay(2), Duration::from_secs(4));
        assert_eq!(config.backoff_delay(3), Duration::from_secs(8));
        assert_eq!(config.backoff_delay(10), Duration::from_secs(30));
        assert_eq!(config.backoff_delay(40), Duration::from_secs(30));
    }
}
