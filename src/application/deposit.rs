//! Deposit strategy use case.
//!
//! Validates and acknowledges a deposit request. No funds move: the reply asks
//! the user to confirm, and execution belongs to the host.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::reply::{ReplyDispatcher, ReplyFormatter};
use super::validate::Validator;
use crate::domain::{DepositDraft, DepositIntent, RawCommand, ValidationFailure};
use crate::port::inbound::command::DepositCommandHandler;
use crate::port::outbound::reply::Reply;

#[derive(Clone)]
pub struct DepositFlow {
    validator: Arc<Validator>,
    dispatcher: Arc<ReplyDispatcher>,
    formatter: Arc<ReplyFormatter>,
}

impl DepositFlow {
    pub fn new(
        validator: Arc<Validator>,
        dispatcher: Arc<ReplyDispatcher>,
        formatter: Arc<ReplyFormatter>,
    ) -> Self {
        Self {
            validator,
            dispatcher,
            formatter,
        }
    }
}

#[async_trait]
impl DepositCommandHandler for DepositFlow {
    async fn handle_deposit(
        &self,
        command: &RawCommand,
        draft: DepositDraft,
    ) -> Result<DepositIntent, ValidationFailure> {
        let outcome = self.validator.validate_deposit(draft);

        let reply = match &outcome {
            Ok(intent) => {
                info!(strategy = %intent.strategy, amount = %intent.amount, "Deposit ready");
                self.formatter.deposit_ready(intent)
            }
            Err(failure) => {
                warn!(reason = %failure, "Deposit rejected");
                let error = match failure {
                    ValidationFailure::InvalidAmount => "Invalid amount",
                    _ => "Invalid strategy",
                };
                Reply::failure(failure.remediation(), error)
            }
        };

        self.dispatcher
            .reply(command.origin_channel(), command.origin_id(), &reply)
            .await;
        outcome
    }
}
