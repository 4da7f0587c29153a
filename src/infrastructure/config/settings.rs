//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file. Secrets such as
//! `WALLET_PRIVATE_KEY` are read from the environment only, and a few
//! deployment values may be overridden there.
//!
//! # Example
//!
//! ```no_run
//! use marketcast::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;
use std::str::FromStr;

use alloy_primitives::Address;
use serde::Deserialize;
use url::Url;

use super::agent::AgentConfig;
use super::llm::{LlmConfig, LlmProvider};
use super::logging::LoggingConfig;
use super::market::MarketConfig;
use super::telegram::TelegramConfig;
use super::twitter::TwitterConfig;
use crate::adapter::outbound::chain::ChainConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Market contract connection.
    #[serde(default)]
    pub chain: ChainConfig,

    /// Defaults applied to market requests.
    #[serde(default)]
    pub market: MarketConfig,

    /// Bot identity and links.
    #[serde(default)]
    pub agent: AgentConfig,

    #[serde(default)]
    pub telegram: TelegramConfig,

    #[serde(default)]
    pub twitter: TwitterConfig,

    /// Model-backed extraction.
    #[serde(default)]
    pub llm: LlmConfig,
}

impl Config {
    /// Parse configuration from TOML content, reading secrets and overrides
    /// from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with(content, |name| std::env::var(name).ok())
    }

    /// Parse configuration from TOML content with an explicit environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml_with<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env(|name| env(name).filter(|v| !v.trim().is_empty()));
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = env("CHAIN_RPC_URL") {
            self.chain.rpc_url = url;
        }
        if let Some(address) = env("PREDICTION_MARKET_ADDRESS") {
            self.chain.contract_address = address;
        }
        if let Some(username) = env("AGENT_USERNAME") {
            self.agent.username = username;
        }
        if let Some(url) = env("FRONTEND_URL") {
            self.agent.frontend_url = Some(url);
        }

        // Secrets are never read from the config file.
        self.chain.private_key = env("WALLET_PRIVATE_KEY").or_else(|| env("PRIVATE_KEY"));
        self.telegram.token = env("TELEGRAM_BOT_TOKEN");
        self.twitter.bearer_token = env("TWITTER_BEARER_TOKEN");
        self.twitter.user_token = env("TWITTER_USER_TOKEN");
        self.llm.api_key = match self.llm.provider {
            LlmProvider::Anthropic => env("ANTHROPIC_API_KEY"),
            LlmProvider::OpenAi => env("OPENAI_API_KEY"),
        };
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.chain.rpc_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "rpc_url" }.into());
        }
        Url::parse(&self.chain.rpc_url).map_err(|e| ConfigError::InvalidValue {
            field: "rpc_url",
            reason: e.to_string(),
        })?;

        if self.chain.contract_address.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "contract_address",
            }
            .into());
        }
        Address::from_str(self.chain.contract_address.trim()).map_err(|e| {
            ConfigError::InvalidValue {
                field: "contract_address",
                reason: e.to_string(),
            }
        })?;

        if self.chain.private_key.is_none() {
            return Err(ConfigError::MissingField {
                field: "WALLET_PRIVATE_KEY",
            }
            .into());
        }
        if self.chain.confirmation_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "confirmation_timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if let Some(url) = &self.agent.frontend_url {
            Url::parse(url).map_err(|e| ConfigError::InvalidValue {
                field: "frontend_url",
                reason: e.to_string(),
            })?;
        }

        self.market.validate()?;

        if self.telegram.enabled && self.telegram.token.is_none() {
            return Err(ConfigError::MissingField {
                field: "TELEGRAM_BOT_TOKEN",
            }
            .into());
        }

        if self.twitter.enabled {
            if self.agent.username.trim().is_empty() {
                return Err(ConfigError::MissingField { field: "username" }.into());
            }
            if self.twitter.bearer_token.is_none() {
                return Err(ConfigError::MissingField {
                    field: "TWITTER_BEARER_TOKEN",
                }
                .into());
            }
            if self.twitter.user_token.is_none() {
                return Err(ConfigError::MissingField {
                    field: "TWITTER_USER_TOKEN",
                }
                .into());
            }
            self.twitter.validate()?;
        }

        if self.llm.enabled && self.llm.api_key.is_none() {
            return Err(ConfigError::MissingField {
                field: self.llm.provider.api_key_var(),
            }
            .into());
        }

        Ok(())
    }

    /// Configured frontend base URL, if any.
    #[must_use]
    pub fn frontend_url(&self) -> Option<Url> {
        self.agent
            .frontend_url
            .as_deref()
            .and_then(|url| Url::parse(url).ok())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error::Error;

    const MINIMAL: &str = r#"
[chain]
rpc_url = "http://127.0.0.1:8545"
contract_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
"#;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    fn with_key() -> impl Fn(&str) -> Option<String> {
        env(&[("WALLET_PRIVATE_KEY", "0xabc")])
    }

    #[test]
    fn minimal_config_loads_with_defaults() {
        let config = Config::parse_toml_with(MINIMAL, with_key()).unwrap();
        assert_eq!(config.chain.confirmation_timeout_secs, 120);
        assert_eq!(config.market.duration_days, 7);
        assert_eq!(config.logging.level, "info");
        assert!(!config.telegram.enabled);
        assert!(!config.twitter.enabled);
        assert!(!config.llm.enabled);
    }

    #[test]
    fn private_key_falls_back_to_legacy_name() {
        let config = Config::parse_toml_with(MINIMAL, env(&[("PRIVATE_KEY", "0xdef")])).unwrap();
        assert_eq!(config.chain.private_key.as_deref(), Some("0xdef"));
    }

    #[test]
    fn missing_private_key_is_rejected() {
        let result = Config::parse_toml_with(MINIMAL, env(&[]));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField {
                field: "WALLET_PRIVATE_KEY"
            }))
        ));
    }

    #[test]
    fn env_overrides_file_values() {
        let config = Config::parse_toml_with(
            MINIMAL,
            env(&[
                ("WALLET_PRIVATE_KEY", "0xabc"),
                ("CHAIN_RPC_URL", "https://rpc.example.org"),
                ("AGENT_USERNAME", "marketbot"),
                ("FRONTEND_URL", "https://app.example.org"),
            ]),
        )
        .unwrap();
        assert_eq!(config.chain.rpc_url, "https://rpc.example.org");
        assert_eq!(config.agent.username, "marketbot");
        assert_eq!(
            config.frontend_url().map(|u| u.to_string()),
            Some("https://app.example.org/".to_string())
        );
    }

    #[test]
    fn missing_rpc_url_is_rejected() {
        let result = Config::parse_toml_with("", with_key());
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField { field: "rpc_url" }))
        ));
    }

    #[test]
    fn malformed_contract_address_is_rejected() {
        let toml = r#"
[chain]
rpc_url = "http://127.0.0.1:8545"
contract_address = "not-an-address"
"#;
        let result = Config::parse_toml_with(toml, with_key());
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "contract_address",
                ..
            }))
        ));
    }

    #[test]
    fn enabled_telegram_requires_token() {
        let toml = format!("{MINIMAL}\n[telegram]\nenabled = true\n");
        let result = Config::parse_toml_with(&toml, with_key());
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField {
                field: "TELEGRAM_BOT_TOKEN"
            }))
        ));
    }

    #[test]
    fn enabled_twitter_requires_username() {
        let toml = format!("{MINIMAL}\n[twitter]\nenabled = true\n");
        let result = Config::parse_toml_with(
            &toml,
            env(&[
                ("WALLET_PRIVATE_KEY", "0xabc"),
                ("TWITTER_BEARER_TOKEN", "b"),
                ("TWITTER_USER_TOKEN", "u"),
            ]),
        );
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField { field: "username" }))
        ));
    }

    #[test]
    fn enabled_llm_requires_provider_key() {
        let toml = format!("{MINIMAL}\n[llm]\nenabled = true\nprovider = \"anthropic\"\n");
        let result = Config::parse_toml_with(&toml, with_key());
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField {
                field: "ANTHROPIC_API_KEY"
            }))
        ));
    }

    #[test]
    fn blank_secret_counts_as_missing() {
        let result = Config::parse_toml_with(MINIMAL, env(&[("WALLET_PRIVATE_KEY", "  ")]));
        assert!(result.is_err());
    }
}
