//! Prediction market contract adapter.
//!
//! Implements [`MarketSubmitter`](crate::port::outbound::market::MarketSubmitter)
//! over an EVM JSON-RPC endpoint with alloy.

pub mod client;
pub mod contract;
pub mod settings;
pub mod submitter;

pub use client::{MarketContractClient, RpcMarketClient};
pub use settings::{ChainConfig, MarketIdMode};
pub use submitter::ChainSubmitter;
