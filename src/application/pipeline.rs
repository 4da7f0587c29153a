//! Market creation pipeline.
//!
//! Drives one command through the state machine:
//!
//! ```text
//! RECEIVED → EXTRACTED → VALIDATED → SUBMITTED → CONFIRMED → REPLIED
//!     │          │           │           │
//!     └──────────┴───────────┴───────────┴──→ FAILED
//! ```
//!
//! Every run replies to its origin exactly once. A run that confirmed a
//! market stays successful even if that reply cannot be delivered.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::extract::Extractor;
use super::reply::{ReplyDispatcher, ReplyFormatter};
use super::submit::SubmissionQueue;
use super::validate::Validator;
use crate::domain::{ParsedMarketRequest, RawCommand, SubmissionResult};
use crate::port::inbound::command::{MarketCommandHandler, PipelineOutcome, PipelineState};
use crate::port::outbound::market::MarketSubmitter;
use crate::port::outbound::reply::Reply;

/// Market creation use case for one source surface.
///
/// Pipelines for different surfaces differ only in their extractor; they
/// share the submission queue and the reply dispatcher.
#[derive(Clone)]
pub struct Pipeline {
    extractor: Arc<dyn Extractor>,
    validator: Arc<Validator>,
    submitter: Arc<dyn MarketSubmitter>,
    queue: Arc<SubmissionQueue>,
    dispatcher: Arc<ReplyDispatcher>,
    formatter: Arc<ReplyFormatter>,
}

impl Pipeline {
    pub fn new(
        extractor: Arc<dyn Extractor>,
        validator: Arc<Validator>,
        submitter: Arc<dyn MarketSubmitter>,
        queue: Arc<SubmissionQueue>,
        dispatcher: Arc<ReplyDispatcher>,
    ) -> Self {
        Self {
            extractor,
            validator,
            submitter,
            queue,
            dispatcher,
            formatter: Arc::new(ReplyFormatter::default()),
        }
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<ReplyFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Same pipeline with a different extractor.
    #[must_use]
    pub fn with_extractor(&self, extractor: Arc<dyn Extractor>) -> Self {
        Self {
            extractor,
            ..self.clone()
        }
    }

    async fn run(&self, command: RawCommand) -> PipelineOutcome {
        let mut run = Run::new();

        let draft = match self.extractor.extract(command.text()).await {
            Ok(draft) => {
                run.advance(PipelineState::Extracted);
                draft
            }
            Err(failure) => {
                warn!(extractor = self.extractor.name(), reason = %failure, "Extraction failed");
                let reply = Reply::failure(
                    failure.remediation_for(command.origin_channel()),
                    failure.to_string(),
                );
                return self.fail(run, &command, &reply).await;
            }
        };

        let request = match self.validator.validate(draft) {
            Ok(request) => {
                run.advance(PipelineState::Validated);
                run.request = Some(request.clone());
                request
            }
            Err(failure) => {
                warn!(reason = %failure, "Validation failed");
                let reply = Reply::failure(failure.remediation(), failure.to_string());
                return self.fail(run, &command, &reply).await;
            }
        };

        info!(
            question = request.question(),
            option_a = request.option_a(),
            option_b = request.option_b(),
            duration_seconds = request.duration_seconds(),
            "Submitting market"
        );

        let result = match self.queue.submit(self.submitter.as_ref(), &request).await {
            Ok(result) => result,
            Err(e) => {
                if e.tx_hash().is_some() {
                    run.advance(PipelineState::Submitted);
                }
                error!(error = %e, tx_hash = e.tx_hash(), "Market submission failed");
                let reply = self.formatter.chain_failure(&e);
                return self.fail(run, &command, &reply).await;
            }
        };

        run.advance(PipelineState::Submitted);
        run.advance(PipelineState::Confirmed);
        info!(
            market_id = result.market_id,
            tx_hash = %result.transaction_hash,
            id_source = %result.id_source,
            "Market created"
        );

        self.confirm(run, &command, &request, result).await
    }

    async fn confirm(
        &self,
        mut run: Run,
        command: &RawCommand,
        request: &ParsedMarketRequest,
        result: SubmissionResult,
    ) -> PipelineOutcome {
        let reply = self.formatter.market_created(request, &result);
        run.submission = Some(result);

        let delivered = self
            .dispatcher
            .reply(command.origin_channel(), command.origin_id(), &reply)
            .await;
        if delivered {
            run.advance(PipelineState::Replied);
        } else {
            warn!("Market confirmed but reply was not delivered");
        }
        run.finish(delivered)
    }

    async fn fail(&self, mut run: Run, command: &RawCommand, reply: &Reply) -> PipelineOutcome {
        run.advance(PipelineState::Failed);
        let delivered = self
            .dispatcher
            .reply(command.origin_channel(), command.origin_id(), reply)
            .await;
        run.finish(delivered)
    }
}

#[async_trait]
impl MarketCommandHandler for Pipeline {
    async fn handle(&self, command: RawCommand) -> PipelineOutcome {
        let span = info_span!(
            "pipeline",
            run_id = %Uuid::new_v4(),
            channel = %command.origin_channel(),
            origin = command.origin_id(),
        );
        self.run(command).instrument(span).await
    }
}

/// State trail of a run in progress.
struct Run {
    trail: Vec<PipelineState>,
    request: Option<ParsedMarketRequest>,
    submission: Option<SubmissionResult>,
}

impl Run {
    fn new() -> Self {
        Self {
            trail: vec![PipelineState::Received],
            request: None,
            submission: None,
        }
    }

    fn current(&self) -> PipelineState {
        self.trail.last().copied().unwrap_or(PipelineState::Received)
    }

    fn advance(&mut self, next: PipelineState) {
        debug_assert!(
            self.current().can_advance_to(next),
            "illegal transition {} -> {next}",
            self.current()
        );
        self.trail.push(next);
    }

    fn finish(self, reply_delivered: bool) -> PipelineOutcome {
        debug_assert!(
            self.current().is_terminal(),
            "run finished in non-terminal state {}",
            self.current()
        );
        PipelineOutcome {
            trail: self.trail,
            request: self.request,
            submission: self.submission,
            reply_delivered,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::application::extract::GrammarExtractor;
    use crate::domain::{MarketIdSource, OriginChannel};
    use crate::error::{ChainError, DeliveryError};
    use crate::port::outbound::reply::ReplySink;

    struct FixedSubmitter(std::result::Result<SubmissionResult, ChainError>);

    #[async_trait]
    impl MarketSubmitter for FixedSubmitter {
        fn signer_identity(&self) -> String {
            "0xsigner".into()
        }

        async fn submit(
            &self,
            _request: &ParsedMarketRequest,
        ) -> std::result::Result<SubmissionResult, ChainError> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct Sink {
        fail: bool,
        sent: Mutex<Vec<Reply>>,
    }

    #[async_trait]
    impl ReplySink for Sink {
        fn platform(&self) -> &'static str {
            "test"
        }

        async fn send(&self, _origin_id: &str, reply: &Reply) -> Result<(), DeliveryError> {
            self.sent.lock().unwrap().push(reply.clone());
            if self.fail {
                Err(DeliveryError::Closed)
            } else {
                Ok(())
            }
        }
    }

    fn pipeline(
        result: std::result::Result<SubmissionResult, ChainError>,
        sink: Arc<Sink>,
    ) -> Pipeline {
        let dispatcher = ReplyDispatcher::new().with_sink(OriginChannel::Chat, sink);
        Pipeline::new(
            Arc::new(GrammarExtractor::new()),
            Arc::new(Validator::default()),
            Arc::new(FixedSubmitter(result)),
            Arc::new(SubmissionQueue::new()),
            Arc::new(dispatcher),
        )
    }

    fn ok() -> std::result::Result<SubmissionResult, ChainError> {
        Ok(SubmissionResult {
            market_id: 3,
            transaction_hash: "0xbeef".into(),
            id_source: MarketIdSource::Event,
        })
    }

    fn command(text: &str) -> RawCommand {
        RawCommand::new(text, OriginChannel::Chat, "room-1")
    }

    #[tokio::test]
    async fn success_walks_full_trail() {
        let sink = Arc::new(Sink::default());
        let outcome = pipeline(ok(), sink.clone())
            .handle(command(r#"create market: "Will it rain?" Options: Yes/No"#))
            .await;

        assert_eq!(
            outcome.trail,
            [
                PipelineState::Received,
                PipelineState::Extracted,
                PipelineState::Validated,
                PipelineState::Submitted,
                PipelineState::Confirmed,
                PipelineState::Replied,
            ]
        );
        assert!(outcome.is_success());
        assert_eq!(sink.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn extraction_failure_fails_from_received() {
        let sink = Arc::new(Sink::default());
        let outcome = pipeline(ok(), sink.clone()).handle(command("hello")).await;

        assert_eq!(outcome.failed_from(), Some(PipelineState::Received));
        assert!(outcome.reply_delivered);
        let sent = sink.sent.lock().unwrap();
        assert!(sent[0].text.contains("Option1/Option2"));
    }

    #[tokio::test]
    async fn validation_failure_fails_from_extracted() {
        let sink = Arc::new(Sink::default());
        let outcome = pipeline(ok(), sink).handle(command("create market: Yes/yes")).await;
        assert_eq!(outcome.failed_from(), Some(PipelineState::Extracted));
        assert!(outcome.request.is_none());
    }

    #[tokio::test]
    async fn pre_broadcast_error_fails_from_validated() {
        let sink = Arc::new(Sink::default());
        let outcome = pipeline(Err(ChainError::Rpc("connection refused".into())), sink)
            .handle(command("create market: A/B"))
            .await;
        assert_eq!(outcome.failed_from(), Some(PipelineState::Validated));
        assert!(outcome.request.is_some());
    }

    #[tokio::test]
    async fn post_broadcast_error_fails_from_submitted() {
        let sink = Arc::new(Sink::default());
        let err = ChainError::Timeout {
            tx_hash: "0xslow".into(),
            waited_secs: 5,
        };
        let outcome = pipeline(Err(err), sink.clone())
            .handle(command("create market: A/B"))
            .await;
        assert_eq!(outcome.failed_from(), Some(PipelineState::Submitted));
        assert!(sink.sent.lock().unwrap()[0].text.contains("0xslow"));
    }

    #[tokio::test]
    async fn undelivered_success_stays_confirmed() {
        let sink = Arc::new(Sink {
            fail: true,
            ..Sink::default()
        });
        let outcome = pipeline(ok(), sink.clone())
            .handle(command("create market: A/B"))
            .await;
        assert_eq!(outcome.final_state(), PipelineState::Confirmed);
        assert!(outcome.is_success());
        assert!(!outcome.reply_delivered);
        assert_eq!(sink.sent.lock().unwrap().len(), 1);
    }
}
