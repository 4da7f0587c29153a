//! Agent actions exposed to a conversational host.
//!
//! The host decides which action a message triggers and invokes it; the
//! action runs the matching use case and answers through the callback sink
//! registered for [`OriginChannel::Chat`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info_span, warn, Instrument};

use crate::application::extract::deposit::is_deposit_command;
use crate::application::extract::grammar::has_create_marker;
use crate::application::extract::{parse_deposit, ModelExtractor};
use crate::domain::{DepositStrategy, OriginChannel, RawCommand};
use crate::port::inbound::command::{DepositCommandHandler, MarketCommandHandler};

/// A message delivered by the host runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentMessage {
    /// Conversation the reply belongs to.
    pub room_id: String,
    pub text: String,
}

impl AgentMessage {
    pub fn new(room_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            text: text.into(),
        }
    }

    fn command(&self) -> RawCommand {
        RawCommand::new(&self.text, OriginChannel::Chat, &self.room_id)
    }
}

/// An action a conversational host can invoke.
#[async_trait]
pub trait AgentAction: Send + Sync {
    /// Identifier the host dispatches on.
    fn name(&self) -> &'static str;

    /// Alternative identifiers.
    fn similes(&self) -> &'static [&'static str] {
        &[]
    }

    fn description(&self) -> &'static str;

    /// Whether this action should handle `message`.
    fn validate(&self, message: &AgentMessage) -> bool;

    /// Run the action, replying through the callback sink.
    ///
    /// Returns whether the action succeeded.
    async fn handle(&self, message: &AgentMessage) -> bool;
}

/// Creates a prediction market from a conversational message.
pub struct CreatePredictionAction {
    markets: Arc<dyn MarketCommandHandler>,
}

impl CreatePredictionAction {
    pub const NAME: &'static str = "CREATE_PREDICTION";

    pub fn new(markets: Arc<dyn MarketCommandHandler>) -> Self {
        Self { markets }
    }
}

#[async_trait]
impl AgentAction for CreatePredictionAction {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn similes(&self) -> &'static [&'static str] {
        &["PREDICTION_CREATION"]
    }

    fn description(&self) -> &'static str {
        "Creates a prediction market using the prediction market contract"
    }

    fn validate(&self, _message: &AgentMessage) -> bool {
        true
    }

    async fn handle(&self, message: &AgentMessage) -> bool {
        self.markets.handle(message.command()).await.is_success()
    }
}

/// Prepares a deposit into one of the BTC yield strategies.
pub struct DepositStrategyAction {
    deposits: Arc<dyn DepositCommandHandler>,
    model: Option<Arc<ModelExtractor>>,
}

impl DepositStrategyAction {
    pub const NAME: &'static str = "BOB_STRATEGY_ACTION";

    pub fn new(deposits: Arc<dyn DepositCommandHandler>) -> Self {
        Self {
            deposits,
            model: None,
        }
    }

    /// Ask `model` for the fields the syntactic parser could not find.
    #[must_use]
    pub fn with_model(mut self, model: Arc<ModelExtractor>) -> Self {
        self.model = Some(model);
        self
    }
}

#[async_trait]
impl AgentAction for DepositStrategyAction {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Handles requests to use BOB strategies"
    }

    fn validate(&self, message: &AgentMessage) -> bool {
        if is_deposit_command(&message.text) {
            return true;
        }
        if has_create_marker(&message.text) {
            return false;
        }
        let lower = message.text.to_ascii_lowercase();
        lower.contains("deposit")
            || lower
                .split(|c: char| !c.is_ascii_alphanumeric())
                .any(|word| DepositStrategy::ALL.iter().any(|s| s.as_str() == word))
    }

    async fn handle(&self, message: &AgentMessage) -> bool {
        let mut draft = parse_deposit(&message.text);

        if draft.strategy.is_none() || draft.amount.is_none() {
            if let Some(model) = &self.model {
                match model.extract_deposit(&message.text).await {
                    Ok(found) => {
                        draft.strategy = draft.strategy.or(found.strategy);
                        draft.amount = draft.amount.or(found.amount);
                    }
                    Err(e) => warn!(error = %e, "Model deposit extraction failed"),
                }
            }
        }

        let command = message.command();
        let span = info_span!("deposit", room = %message.room_id);
        self.deposits
            .handle_deposit(&command, draft)
            .instrument(span)
            .await
            .is_ok()
    }
}
