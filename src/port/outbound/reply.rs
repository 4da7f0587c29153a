//! Reply port: the single capability each platform adapter provides.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::{DepositIntent, ParsedMarketRequest, SubmissionResult};
use crate::error::DeliveryError;

/// A message sent back to the conversation a command came from.
///
/// `text` is shown to the user; `content` is the machine-readable payload
/// hosts such as agent runtimes consume.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub content: Value,
}

impl Reply {
    /// Plain text reply with no structured content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            content: Value::Null,
        }
    }

    /// Successful market creation.
    pub fn market_created(
        text: impl Into<String>,
        request: &ParsedMarketRequest,
        result: &SubmissionResult,
    ) -> Self {
        Self {
            text: text.into(),
            content: json!({
                "marketId": result.market_id,
                "transactionHash": result.transaction_hash,
                "parameters": request,
            }),
        }
    }

    /// Failure carrying a short error description.
    pub fn failure(text: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            content: json!({ "error": error.into() }),
        }
    }

    /// Deposit ready for user confirmation.
    pub fn deposit_ready(text: impl Into<String>, intent: &DepositIntent) -> Self {
        Self {
            text: text.into(),
            content: json!({
                "strategy": intent.strategy,
                "amount": intent.amount,
                "readyToDeposit": true,
            }),
        }
    }
}

/// Sends replies on one platform.
///
/// Implemented once per source adapter; the pipeline never learns which
/// platform it is serving.
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Platform name for logging.
    fn platform(&self) -> &'static str;

    /// Deliver `reply` to the conversation identified by `origin_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] if the platform rejects or cannot receive the reply.
    async fn send(&self, origin_id: &str, reply: &Reply) -> Result<(), DeliveryError>;
}
