//! Market contract port.

use async_trait::async_trait;

use crate::domain::{ParsedMarketRequest, SubmissionResult};
use crate::error::ChainError;

/// Submits validated market requests to the market contract.
///
/// One call is one on-chain attempt: implementations broadcast the creation
/// transaction, wait (bounded) for its receipt and resolve the new market id.
/// They never retry.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. Callers serialize submissions per
/// [`signer_identity`](Self::signer_identity); implementations need not.
#[async_trait]
pub trait MarketSubmitter: Send + Sync {
    /// Stable identifier of the signing identity (e.g. its address).
    fn signer_identity(&self) -> String;

    /// Create the market described by `request`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError`] on RPC failure, revert, timeout, or when the
    /// market id cannot be resolved. Errors after broadcast carry the tx hash.
    async fn submit(&self, request: &ParsedMarketRequest) -> Result<SubmissionResult, ChainError>;
}
