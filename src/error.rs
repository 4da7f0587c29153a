use thiserror::Error;

use crate::domain::{ExtractionFailure, ValidationFailure};

/// Configuration-related errors with structured variants.
///
/// Always fatal: raised while building the runtime, never per request.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// On-chain submission errors.
#[derive(Error, Debug, Clone)]
pub enum ChainError {
    #[error("failed to build signing wallet: {0}")]
    Wallet(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("failed to broadcast transaction: {0}")]
    Broadcast(String),

    #[error("failed to get receipt for {tx_hash}: {reason}")]
    Receipt { tx_hash: String, reason: String },

    #[error("transaction {tx_hash} reverted")]
    Reverted { tx_hash: String },

    #[error("transaction {tx_hash} not confirmed within {waited_secs}s")]
    Timeout { tx_hash: String, waited_secs: u64 },

    #[error("failed to resolve market id for {tx_hash}: {reason}")]
    MarketId { tx_hash: String, reason: String },
}

impl ChainError {
    /// Hash of the broadcast transaction, if the failure happened after broadcast.
    #[must_use]
    pub fn tx_hash(&self) -> Option<&str> {
        match self {
            Self::Receipt { tx_hash, .. }
            | Self::Reverted { tx_hash }
            | Self::Timeout { tx_hash, .. }
            | Self::MarketId { tx_hash, .. } => Some(tx_hash),
            Self::Wallet(_) | Self::Rpc(_) | Self::Broadcast(_) => None,
        }
    }
}

/// A reply could not be delivered to its origin channel.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("invalid origin id `{0}`")]
    InvalidOrigin(String),

    #[error("reply rejected by {platform}: {reason}")]
    Rejected {
        platform: &'static str,
        reason: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("reply channel closed")]
    Closed,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Extraction(#[from] ExtractionFailure),

    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
