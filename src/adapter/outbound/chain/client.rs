//! JSON-RPC access to the market contract.

use alloy_primitives::{Address, Log, U256};
use alloy_provider::network::EthereumWallet;
use alloy_provider::ProviderBuilder;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use url::Url;

use super::contract::PredictionMarket;
use crate::domain::ParsedMarketRequest;
use crate::error::ChainError;

/// Receipt fields needed to settle a market creation.
#[derive(Debug, Clone, Default)]
pub struct CreationReceipt {
    pub succeeded: bool,
    pub block_number: Option<u64>,
    pub logs: Vec<Log>,
}

/// A broadcast `createMarket` transaction.
pub struct Broadcast {
    pub tx_hash: String,
    /// Resolves once the transaction is mined. Unbounded; callers apply the timeout.
    pub receipt: BoxFuture<'static, Result<CreationReceipt, String>>,
}

/// Raw calls against the prediction market contract.
#[async_trait]
pub trait MarketContractClient: Send + Sync {
    /// Address transactions are signed with.
    fn signer_address(&self) -> Address;

    fn contract_address(&self) -> Address;

    /// Sign and broadcast `createMarket` for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::Broadcast`] if the transaction is not accepted.
    async fn create_market(&self, request: &ParsedMarketRequest) -> Result<Broadcast, ChainError>;

    /// Current value of `marketCount()`.
    async fn market_count(&self) -> Result<U256, String>;
}

/// [`MarketContractClient`] over an HTTP JSON-RPC endpoint.
pub struct RpcMarketClient {
    signer: PrivateKeySigner,
    rpc_url: Url,
    contract: Address,
}

impl RpcMarketClient {
    #[must_use]
    pub const fn new(signer: PrivateKeySigner, rpc_url: Url, contract: Address) -> Self {
        Self {
            signer,
            rpc_url,
            contract,
        }
    }
}

#[async_trait]
impl MarketContractClient for RpcMarketClient {
    fn signer_address(&self) -> Address {
        self.signer.address()
    }

    fn contract_address(&self) -> Address {
        self.contract
    }

    async fn create_market(&self, request: &ParsedMarketRequest) -> Result<Broadcast, ChainError> {
        let wallet = EthereumWallet::from(self.signer.clone());
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(self.rpc_url.clone());
        let market = PredictionMarket::new(self.contract, &provider);

        let pending_tx = market
            .createMarket(
                request.question().to_string(),
                request.option_a().to_string(),
                request.option_b().to_string(),
                U256::from(request.duration_seconds()),
                request.category().to_string(),
                request.tags().to_vec(),
                U256::from(request.fee_basis_points()),
            )
            .send()
            .await
            .map_err(|e| ChainError::Broadcast(e.to_string()))?;

        let tx_hash = format!("{:?}", pending_tx.tx_hash());
        let receipt = async move {
            let receipt = pending_tx.get_receipt().await.map_err(|e| e.to_string())?;
            Ok(CreationReceipt {
                succeeded: receipt.status(),
                block_number: receipt.block_number,
                logs: receipt.inner.logs().iter().map(|log| log.inner.clone()).collect(),
            })
        }
        .boxed();

        Ok(Broadcast { tx_hash, receipt })
    }

    async fn market_count(&self) -> Result<U256, String> {
        let provider = ProviderBuilder::new().connect_http(self.rpc_url.clone());
        PredictionMarket::new(self.contract, &provider)
            .marketCount()
            .call()
            .await
            .map_err(|e| e.to_string())
    }
}
