//! Per-signer submission serialization.
//!
//! Two transactions from one signer must not race for the same nonce, so
//! submissions sharing a [`signer_identity`](MarketSubmitter::signer_identity)
//! run one at a time. Different signers proceed in parallel.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::{ParsedMarketRequest, SubmissionResult};
use crate::error::ChainError;
use crate::port::outbound::market::MarketSubmitter;

/// FIFO lanes keyed by signer identity.
#[derive(Debug, Default)]
pub struct SubmissionQueue {
    lanes: DashMap<String, Arc<Mutex<()>>>,
}

impl SubmissionQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit `request` through `submitter`, waiting for earlier submissions
    /// from the same signer to finish first.
    ///
    /// # Errors
    ///
    /// Propagates the submitter's [`ChainError`].
    pub async fn submit(
        &self,
        submitter: &dyn MarketSubmitter,
        request: &ParsedMarketRequest,
    ) -> Result<SubmissionResult, ChainError> {
        let signer = submitter.signer_identity();
        let lane = self.lanes.entry(signer.clone()).or_default().clone();

        let _turn = lane.lock().await;
        debug!(signer = %signer, "Submission lane acquired");
        submitter.submit(request).await
    }

    /// Number of signers seen so far.
    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }
}
