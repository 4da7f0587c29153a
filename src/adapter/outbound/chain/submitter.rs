//! On-chain market submission.
//!
//! Each submission is a single attempt: broadcast `createMarket`, wait for
//! the receipt within the configured bound, then resolve the new market id.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, U256};
use alloy_signer::Signer as _;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use tracing::{debug, info, warn};
use url::Url;

use super::client::{MarketContractClient, RpcMarketClient};
use super::contract::created_market_id;
use super::settings::{ChainConfig, MarketIdMode};
use crate::domain::{MarketIdSource, ParsedMarketRequest, SubmissionResult};
use crate::error::{ChainError, ConfigError, Result};
use crate::port::outbound::market::MarketSubmitter;

/// Prefix a hex private key with `0x` when it lacks one.
#[must_use]
pub fn normalize_private_key(key: &str) -> String {
    let key = key.trim();
    if key.starts_with("0x") || key.starts_with("0X") {
        key.to_string()
    } else {
        format!("0x{key}")
    }
}

/// Submits markets to the prediction market contract with a local signer.
pub struct ChainSubmitter {
    client: Arc<dyn MarketContractClient>,
    confirmation_timeout: Duration,
    id_mode: MarketIdMode,
}

impl ChainSubmitter {
    /// Build a submitter from the `[chain]` section.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::Wallet`] if the signing key is missing or invalid,
    /// and [`ConfigError::InvalidValue`] for a malformed URL or address.
    pub fn new(config: &ChainConfig) -> Result<Self> {
        let key = config
            .private_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ChainError::Wallet("no signing key configured".into()))?;

        let signer = PrivateKeySigner::from_str(&normalize_private_key(key))
            .map_err(|e| ChainError::Wallet(e.to_string()))?
            .with_chain_id(config.chain_id);

        let rpc_url = Url::parse(&config.rpc_url).map_err(|e| ConfigError::InvalidValue {
            field: "rpc_url",
            reason: e.to_string(),
        })?;

        let contract =
            Address::from_str(&config.contract_address).map_err(|e| ConfigError::InvalidValue {
                field: "contract_address",
                reason: e.to_string(),
            })?;

        Ok(Self::with_client(
            Arc::new(RpcMarketClient::new(signer, rpc_url, contract)),
            Duration::from_secs(config.confirmation_timeout_secs),
            config.market_id,
        ))
    }

    /// Build a submitter over an existing contract client.
    #[must_use]
    pub fn with_client(
        client: Arc<dyn MarketContractClient>,
        confirmation_timeout: Duration,
        id_mode: MarketIdMode,
    ) -> Self {
        Self {
            client,
            confirmation_timeout,
            id_mode,
        }
    }

    /// Address of the signing wallet.
    #[must_use]
    pub fn wallet_address(&self) -> Address {
        self.client.signer_address()
    }

    #[must_use]
    pub fn contract_address(&self) -> Address {
        self.client.contract_address()
    }

    /// Read `marketCount() - 1`.
    async fn market_id_from_counter(&self, tx_hash: &str) -> std::result::Result<U256, ChainError> {
        let count = self
            .client
            .market_count()
            .await
            .map_err(|reason| ChainError::MarketId {
                tx_hash: tx_hash.to_string(),
                reason: format!("marketCount call failed: {reason}"),
            })?;

        count
            .checked_sub(U256::from(1))
            .ok_or_else(|| ChainError::MarketId {
                tx_hash: tx_hash.to_string(),
                reason: "marketCount returned 0 after creation".into(),
            })
    }
}

#[async_trait]
impl MarketSubmitter for ChainSubmitter {
    fn signer_identity(&self) -> String {
        self.client.signer_address().to_string()
    }

    async fn submit(
        &self,
        request: &ParsedMarketRequest,
    ) -> std::result::Result<SubmissionResult, ChainError> {
        let broadcast = self.client.create_market(request).await?;
        let tx_hash = broadcast.tx_hash;
        info!(tx_hash = %tx_hash, "Market transaction sent");

        let receipt = tokio::time::timeout(self.confirmation_timeout, broadcast.receipt)
            .await
            .map_err(|_| ChainError::Timeout {
                tx_hash: tx_hash.clone(),
                waited_secs: self.confirmation_timeout.as_secs(),
            })?
            .map_err(|reason| ChainError::Receipt {
                tx_hash: tx_hash.clone(),
                reason,
            })?;

        if !receipt.succeeded {
            return Err(ChainError::Reverted { tx_hash });
        }
        debug!(tx_hash = %tx_hash, block = ?receipt.block_number, "Market transaction confirmed");

        let event_id = match self.id_mode {
            MarketIdMode::Event => created_market_id(&receipt.logs, self.client.contract_address()),
            MarketIdMode::Counter => None,
        };

        let (raw_id, id_source) = match event_id {
            Some(id) => (id, MarketIdSource::Event),
            None => {
                warn!(
                    tx_hash = %tx_hash,
                    mode = %self.id_mode,
                    "Reading market id from marketCount; concurrent creations may skew it"
                );
                (self.market_id_from_counter(&tx_hash).await?, MarketIdSource::Counter)
            }
        };

        let market_id = u64::try_from(raw_id).map_err(|e| ChainError::MarketId {
            tx_hash: tx_hash.clone(),
            reason: e.to_string(),
        })?;

        Ok(SubmissionResult {
            market_id,
            transaction_hash: tx_hash,
            id_source,
        })
    }
}
