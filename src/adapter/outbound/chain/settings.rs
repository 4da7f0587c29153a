//! Market contract connection settings.

use std::fmt;

use serde::Deserialize;

/// How the id of a newly created market is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketIdMode {
    /// Decode the `MarketCreated` event, reading the counter only when absent.
    #[default]
    Event,
    /// Always read `marketCount() - 1` after confirmation.
    Counter,
}

impl fmt::Display for MarketIdMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Event => write!(f, "event"),
            Self::Counter => write!(f, "counter"),
        }
    }
}

/// `[chain]` section.
#[derive(Clone, Deserialize)]
pub struct ChainConfig {
    /// JSON-RPC endpoint. Overridden by `CHAIN_RPC_URL`.
    #[serde(default)]
    pub rpc_url: String,
    /// Market contract address. Overridden by `PREDICTION_MARKET_ADDRESS`.
    #[serde(default)]
    pub contract_address: String,
    /// Chain id for signing; queried from the node when unset.
    #[serde(default)]
    pub chain_id: Option<u64>,
    /// Upper bound on the wait for a receipt after broadcast.
    #[serde(default = "default_confirmation_timeout_secs")]
    pub confirmation_timeout_secs: u64,
    #[serde(default)]
    pub market_id: MarketIdMode,
    /// Signing key, read from `WALLET_PRIVATE_KEY` (or `PRIVATE_KEY`) only.
    #[serde(skip)]
    pub private_key: Option<String>,
}

const fn default_confirmation_timeout_secs() -> u64 {
    120
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: String::new(),
            contract_address: String::new(),
            chain_id: None,
            confirmation_timeout_secs: default_confirmation_timeout_secs(),
            market_id: MarketIdMode::default(),
            private_key: None,
        }
    }
}

impl fmt::Debug for ChainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainConfig")
            .field("rpc_url", &self.rpc_url)
            .field("contract_address", &self.contract_address)
            .field("chain_id", &self.chain_id)
            .field("confirmation_timeout_secs", &self.confirmation_timeout_secs)
            .field("market_id", &self.market_id)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config: ChainConfig = toml::from_str("").unwrap();
        assert_eq!(config.confirmation_timeout_secs, 120);
        assert_eq!(config.market_id, MarketIdMode::Event);
        assert!(config.chain_id.is_none());
    }

    #[test]
    fn counter_mode_parses() {
        let config: ChainConfig = toml::from_str(r#"market_id = "counter""#).unwrap();
        assert_eq!(config.market_id, MarketIdMode::Counter);
    }

    #[test]
    fn debug_redacts_private_key() {
        let config = ChainConfig {
            private_key: Some("0xsecret".into()),
            ..ChainConfig::default()
        };
        let printed = format!("{config:?}");
        assert!(!printed.contains("0xsecret"));
        assert!(printed.contains("<redacted>"));
    }
}
