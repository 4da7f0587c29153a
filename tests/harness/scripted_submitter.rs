use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use marketcast::domain::{MarketIdSource, ParsedMarketRequest, SubmissionResult};
use marketcast::error::ChainError;
use marketcast::port::outbound::market::MarketSubmitter;

/// Submitter that plays back scripted results and records every request.
///
/// Once the script runs out it confirms markets with ids 0, 1, 2...
#[derive(Default)]
pub struct ScriptedSubmitter {
    script: Mutex<VecDeque<Result<SubmissionResult, ChainError>>>,
    submitted: Mutex<Vec<ParsedMarketRequest>>,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn push(&self, result: Result<SubmissionResult, ChainError>) {
        self.script.lock().expect("lock script").push_back(result);
    }

    pub fn submitted(&self) -> Vec<ParsedMarketRequest> {
        self.submitted.lock().expect("lock submitted").clone()
    }

    /// Highest number of submissions observed running at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

pub fn confirmed(market_id: u64, tx_hash: &str) -> Result<SubmissionResult, ChainError> {
    Ok(SubmissionResult {
        market_id,
        transaction_hash: tx_hash.to_string(),
        id_source: MarketIdSource::Event,
    })
}

#[async_trait]
impl MarketSubmitter for ScriptedSubmitter {
    fn signer_identity(&self) -> String {
        "0x00000000000000000000000000000000000000a1".into()
    }

    async fn submit(&self, request: &ParsedMarketRequest) -> Result<SubmissionResult, ChainError> {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        let count = {
            let mut submitted = self.submitted.lock().expect("lock submitted");
            submitted.push(request.clone());
            submitted.len() as u64
        };
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let next = self.script.lock().expect("lock script").pop_front();

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        next.unwrap_or_else(|| confirmed(count - 1, &format!("0x{count:064x}")))
    }
}
