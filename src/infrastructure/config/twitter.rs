//! Twitter (X API v2) surface configuration.

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// `[twitter]` section.
///
/// Reconnect backoff for the filtered stream starts at `initial_delay_ms`,
/// grows by `backoff_multiplier` after each failed connection and is capped
/// at `max_delay_ms`.
#[derive(Clone, Deserialize)]
pub struct TwitterConfig {
    /// Start the filtered-stream listener.
    #[serde(default)]
    pub enabled: bool,
    /// Filtered stream endpoint.
    #[serde(default = "default_stream_url")]
    pub stream_url: String,
    /// REST base URL for rules and replies.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Initial delay before the first reconnection attempt (milliseconds).
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    /// Maximum delay between reconnection attempts (milliseconds).
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Multiplier applied to the delay after each failed attempt.
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
    /// App-only token used for the stream and rule endpoints.
    #[serde(skip)]
    pub bearer_token: Option<String>,
    /// User-context token used to post replies.
    #[serde(skip)]
    pub user_token: Option<String>,
}

fn default_stream_url() -> String {
    "https://api.twitter.com/2/tweets/search/stream".into()
}

fn default_api_url() -> String {
    "https://api.twitter.com".into()
}

const fn default_initial_delay_ms() -> u64 {
    1000
}

const fn default_max_delay_ms() -> u64 {
    60_000
}

const fn default_backoff_multiplier() -> f64 {
    2.0
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            stream_url: default_stream_url(),
            api_url: default_api_url(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            bearer_token: None,
            user_token: None,
        }
    }
}

impl std::fmt::Debug for TwitterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterConfig")
            .field("enabled", &self.enabled)
            .field("stream_url", &self.stream_url)
            .field("api_url", &self.api_url)
            .field("initial_delay_ms", &self.initial_delay_ms)
            .field("max_delay_ms", &self.max_delay_ms)
            .field("backoff_multiplier", &self.backoff_multiplier)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("user_token", &self.user_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl TwitterConfig {
    #[allow(clippy::result_large_err)]
    pub(crate) fn validate(&self) -> Result<()> {
        for (field, value) in [("stream_url", &self.stream_url), ("api_url", &self.api_url)] {
            url::Url::parse(value).map_err(|e| ConfigError::InvalidValue {
                field,
                reason: e.to_string(),
            })?;
        }
        if self.initial_delay_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "initial_delay_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.max_delay_ms < self.initial_delay_ms {
            return Err(ConfigError::InvalidValue {
                field: "max_delay_ms",
                reason: "must be at least initial_delay_ms".to_string(),
            }
            .into());
        }
        if self.backoff_multiplier < 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "backoff_multiplier",
                reason: "must be at least 1.0".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Delay before reconnection attempt number `attempt` (0-based).
    #[must_use]
    pub fn reconnect_delay(&self, attempt: u32) -> std::time::Duration {
        let factor = self.backoff_multiplier.powi(attempt.min(32) as i32);
        let millis = (self.initial_delay_ms as f64 * factor).min(self.max_delay_ms as f64);
        std::time::Duration::from_millis(millis as u64)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn backoff_grows_and_caps() {
        let config = TwitterConfig::default();
        assert_eq!(config.reconnect_delay(0), Duration::from_secs(1));
        assert_eq!(config.reconnect_delay(1), Duration::from_secs(2));
        assert_eq!(config.reconnect_delay(3), Duration::from_secs(8));
        assert_eq!(config.reconnect_delay(20), Duration::from_secs(60));
    }

    #[test]
    fn rejects_shrinking_backoff() {
        let config = TwitterConfig {
            backoff_multiplier: 0.5,
            ..TwitterConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_redacts_tokens() {
        let config = TwitterConfig {
            bearer_token: Some("secret-bearer".into()),
            ..TwitterConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-bearer"));
        assert!(debug.contains("<redacted>"));
    }
}
