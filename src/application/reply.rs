//! Reply routing and user-facing message text.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, warn};
use url::Url;

use crate::domain::{DepositIntent, OriginChannel, ParsedMarketRequest, SubmissionResult};
use crate::error::ChainError;
use crate::port::outbound::reply::{Reply, ReplySink};

/// Routes each reply to the sink registered for its origin channel.
///
/// Delivery is best-effort: failures are logged and reported to the caller
/// as `false`, never raised.
#[derive(Clone, Default)]
pub struct ReplyDispatcher {
    sinks: HashMap<OriginChannel, Arc<dyn ReplySink>>,
}

impl ReplyDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `sink` for `channel`, replacing any earlier one.
    pub fn register(&mut self, channel: OriginChannel, sink: Arc<dyn ReplySink>) {
        self.sinks.insert(channel, sink);
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with_sink(mut self, channel: OriginChannel, sink: Arc<dyn ReplySink>) -> Self {
        self.register(channel, sink);
        self
    }

    /// Send `reply` to `origin_id` on `channel`. Returns whether it was delivered.
    pub async fn reply(&self, channel: OriginChannel, origin_id: &str, reply: &Reply) -> bool {
        let Some(sink) = self.sinks.get(&channel) else {
            warn!(channel = %channel, origin = origin_id, "No reply sink registered");
            return false;
        };

        match sink.send(origin_id, reply).await {
            Ok(()) => {
                debug!(platform = sink.platform(), origin = origin_id, "Reply delivered");
                true
            }
            Err(e) => {
                error!(
                    platform = sink.platform(),
                    origin = origin_id,
                    error = %e,
                    "Reply delivery failed"
                );
                false
            }
        }
    }
}

/// Builds the text of pipeline replies.
#[derive(Debug, Clone, Default)]
pub struct ReplyFormatter {
    frontend_url: Option<Url>,
}

impl ReplyFormatter {
    #[must_use]
    pub const fn new(frontend_url: Option<Url>) -> Self {
        Self { frontend_url }
    }

    /// Link to a market on the frontend, if one is configured.
    #[must_use]
    pub fn market_link(&self, market_id: u64) -> Option<String> {
        let base = self.frontend_url.as_ref()?;
        Some(format!(
            "{}/markets/{market_id}",
            base.as_str().trim_end_matches('/')
        ))
    }

    #[must_use]
    pub fn market_created(&self, request: &ParsedMarketRequest, result: &SubmissionResult) -> Reply {
        let mut text = format!(
            "Market created!\n\nMarket ID: {}\nQuestion: {}\nOptions: {} / {}\nTransaction: {}",
            result.market_id,
            request.question(),
            request.option_a(),
            request.option_b(),
            result.transaction_hash,
        );
        if let Some(link) = self.market_link(result.market_id) {
            text.push_str("\n\nTrade it here: ");
            text.push_str(&link);
        }
        Reply::market_created(text, request, result)
    }

    /// Reply for a chain failure. Internal detail stays in the logs.
    #[must_use]
    pub fn chain_failure(&self, error: &ChainError) -> Reply {
        match error {
            ChainError::Timeout {
                tx_hash,
                waited_secs,
            } => Reply::failure(
                format!(
                    "Your market transaction {tx_hash} was sent but not confirmed within {waited_secs} seconds. \
                     Please check it on a block explorer before trying again."
                ),
                "Confirmation timed out",
            ),
            ChainError::MarketId { tx_hash, .. } => Reply::failure(
                format!(
                    "Your market was created in transaction {tx_hash}, but its market id could not be read. \
                     Please check the transaction on a block explorer instead of creating it again."
                ),
                "Market id unavailable",
            ),
            ChainError::Receipt { tx_hash, .. } => Reply::failure(
                format!(
                    "Your market transaction {tx_hash} was sent but its confirmation could not be read. \
                     Please check it on a block explorer before trying again."
                ),
                "Confirmation unavailable",
            ),
            _ => Reply::failure(
                "Sorry, there was an error creating the market. Please try again later.",
                "Market creation failed",
            ),
        }
    }

    #[must_use]
    pub fn deposit_ready(&self, intent: &DepositIntent) -> Reply {
        let name = capitalize(intent.strategy.as_str());
        let text = format!(
            "Great! I'll help you deposit {} BTC into the {name} strategy.\n\n{}\n\nWould you like to proceed with the deposit?",
            intent.amount.normalize(),
            intent.strategy.description(),
        );
        Reply::deposit_ready(text, intent)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
