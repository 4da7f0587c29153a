mod harness;

use std::sync::Arc;
use std::time::Duration;

use harness::recording_reply::RecordingReplySink;
use harness::scripted_submitter::{confirmed, ScriptedSubmitter};
use marketcast::domain::{OriginChannel, RawCommand};
use marketcast::error::ChainError;
use marketcast::port::inbound::command::{MarketCommandHandler, PipelineState};

const RAIN: &str = r#"@marketbot create market: "Will it rain tomorrow?" Options: Yes/No"#;

#[tokio::test]
async fn mention_creates_default_filled_market_and_replies_once() {
    let submitter = Arc::new(ScriptedSubmitter::new());
    submitter.push(confirmed(7, "0xfeed"));
    let sink = Arc::new(RecordingReplySink::new());
    let pipeline = harness::pipeline(submitter.clone(), sink.clone());

    let outcome = pipeline
        .handle(RawCommand::new(RAIN, OriginChannel::Twitter, "1790000000000000001"))
        .await;

    assert_eq!(outcome.final_state(), PipelineState::Replied);
    let request = &submitter.submitted()[0];
    assert_eq!(request.question(), "Will it rain tomorrow?");
    assert_eq!(request.option_a(), "Yes");
    assert_eq!(request.option_b(), "No");
    assert_eq!(request.duration_seconds(), 7 * 86_400);
    assert_eq!(request.category(), "SOCIAL");
    assert_eq!(request.fee_basis_points(), 100);

    let (origin, reply) = sink.only();
    assert_eq!(origin, "1790000000000000001");
    assert!(reply.text.contains("Market ID: 7"));
    assert!(reply.text.contains("Yes / No"));
    assert!(reply.text.contains("0xfeed"));
    assert!(reply.text.contains("https://markets.example.org/markets/7"));
    assert_eq!(reply.content["marketId"], 7);
    assert_eq!(reply.content["parameters"]["optionB"], "No");
}

#[tokio::test]
async fn options_only_command_gets_synthetic_question() {
    let submitter = Arc::new(ScriptedSubmitter::new());
    let sink = Arc::new(RecordingReplySink::new());
    let pipeline = harness::pipeline(submitter.clone(), sink);

    let outcome = pipeline
        .handle(RawCommand::new("/create Lakers/Celtics", OriginChannel::Telegram, "42"))
        .await;

    assert!(outcome.is_success());
    let question = submitter.submitted()[0].question().to_string();
    assert!(question.contains("Lakers"));
    assert!(question.contains("Celtics"));
}

#[tokio::test]
async fn unmatched_text_replies_with_both_formats_and_never_submits() {
    let submitter = Arc::new(ScriptedSubmitter::new());
    let sink = Arc::new(RecordingReplySink::new());
    let pipeline = harness::pipeline(submitter.clone(), sink.clone());

    let outcome = pipeline
        .handle(RawCommand::new("create market: soon", OriginChannel::Chat, "room"))
        .await;

    assert_eq!(outcome.failed_from(), Some(PipelineState::Received));
    assert!(submitter.submitted().is_empty());
    let (_, reply) = sink.only();
    assert!(reply.text.contains(r#"Options: Option1/Option2"#));
    assert!(reply.text.contains("create market: Option1/Option2"));
    assert!(reply.content.get("error").is_some());
}

#[tokio::test]
async fn unmatched_telegram_command_gets_bot_command_help() {
    let submitter = Arc::new(ScriptedSubmitter::new());
    let sink = Arc::new(RecordingReplySink::new());
    let pipeline = harness::pipeline(submitter.clone(), sink.clone());

    let outcome = pipeline
        .handle(RawCommand::new("/create whenever", OriginChannel::Telegram, "42"))
        .await;

    assert_eq!(outcome.failed_from(), Some(PipelineState::Received));
    assert!(submitter.submitted().is_empty());
    let (_, reply) = sink.only();
    assert!(reply.text.contains(r#"/create "Your question?" Options: Option1/Option2"#));
    assert!(!reply.text.contains("create market:"));
}

#[tokio::test]
async fn identical_options_fail_validation() {
    let submitter = Arc::new(ScriptedSubmitter::new());
    let sink = Arc::new(RecordingReplySink::new());
    let pipeline = harness::pipeline(submitter.clone(), sink.clone());

    let outcome = pipeline
        .handle(RawCommand::new("create market: Yes/YES", OriginChannel::Chat, "room"))
        .await;

    assert_eq!(outcome.failed_from(), Some(PipelineState::Extracted));
    assert!(submitter.submitted().is_empty());
    assert!(sink.only().1.text.contains("different options"));
}

#[tokio::test]
async fn rpc_failure_reply_hides_internal_detail() {
    let submitter = Arc::new(ScriptedSubmitter::new());
    submitter.push(Err(ChainError::Rpc("dial tcp 10.0.0.3:8545: refused".into())));
    let sink = Arc::new(RecordingReplySink::new());
    let pipeline = harness::pipeline(submitter, sink.clone());

    let outcome = pipeline
        .handle(RawCommand::new(RAIN, OriginChannel::Twitter, "1"))
        .await;

    assert_eq!(outcome.failed_from(), Some(PipelineState::Validated));
    let (_, reply) = sink.only();
    assert!(reply.text.contains("try again later"));
    assert!(!reply.text.contains("10.0.0.3"));
}

#[tokio::test]
async fn confirmation_timeout_reply_names_the_transaction() {
    let submitter = Arc::new(ScriptedSubmitter::new());
    submitter.push(Err(ChainError::Timeout {
        tx_hash: "0xslow".into(),
        waited_secs: 120,
    }));
    let sink = Arc::new(RecordingReplySink::new());
    let pipeline = harness::pipeline(submitter, sink.clone());

    let outcome = pipeline
        .handle(RawCommand::new(RAIN, OriginChannel::Twitter, "1"))
        .await;

    assert_eq!(outcome.failed_from(), Some(PipelineState::Submitted));
    assert!(!outcome.is_success());
    let (_, reply) = sink.only();
    assert!(reply.text.contains("0xslow"));
    assert!(reply.text.contains("120 seconds"));
}

#[tokio::test]
async fn unreadable_market_id_reply_says_market_was_created() {
    let submitter = Arc::new(ScriptedSubmitter::new());
    submitter.push(Err(ChainError::MarketId {
        tx_hash: "0xconfirmed".into(),
        reason: "marketCount returned 0 after creation".into(),
    }));
    let sink = Arc::new(RecordingReplySink::new());
    let pipeline = harness::pipeline(submitter, sink.clone());

    let outcome = pipeline
        .handle(RawCommand::new(RAIN, OriginChannel::Twitter, "1"))
        .await;

    assert_eq!(
        outcome.trail,
        [
            PipelineState::Received,
            PipelineState::Extracted,
            PipelineState::Validated,
            PipelineState::Submitted,
            PipelineState::Failed,
        ]
    );
    let (_, reply) = sink.only();
    assert!(reply.text.contains("0xconfirmed"));
    assert!(reply.text.contains("was created"));
    assert!(!reply.text.contains("try again later"));
}

#[tokio::test]
async fn undelivered_reply_keeps_market_confirmed() {
    let submitter = Arc::new(ScriptedSubmitter::new());
    let sink = Arc::new(RecordingReplySink::rejecting());
    let pipeline = harness::pipeline(submitter, sink.clone());

    let outcome = pipeline
        .handle(RawCommand::new(RAIN, OriginChannel::Twitter, "1"))
        .await;

    assert_eq!(outcome.final_state(), PipelineState::Confirmed);
    assert!(outcome.is_success());
    assert!(!outcome.reply_delivered);
    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn concurrent_commands_from_one_signer_submit_one_at_a_time() {
    let submitter = Arc::new(ScriptedSubmitter::with_delay(Duration::from_millis(20)));
    let sink = Arc::new(RecordingReplySink::new());
    let pipeline = harness::pipeline(submitter.clone(), sink.clone());

    let mut tasks = Vec::new();
    for i in 0..4 {
        let pipeline = pipeline.clone();
        tasks.push(tokio::spawn(async move {
            pipeline
                .handle(RawCommand::new(
                    format!("create market: A{i}/B{i}"),
                    OriginChannel::Chat,
                    format!("room-{i}"),
                ))
                .await
        }));
    }
    for task in tasks {
        assert!(task.await.unwrap().is_success());
    }

    assert_eq!(submitter.submitted().len(), 4);
    assert_eq!(submitter.max_in_flight(), 1);
    assert_eq!(sink.len(), 4);
}

#[tokio::test]
async fn channel_without_sink_still_confirms() {
    use marketcast::application::extract::GrammarExtractor;
    use marketcast::application::{Pipeline, ReplyDispatcher, SubmissionQueue, Validator};

    let pipeline = Pipeline::new(
        Arc::new(GrammarExtractor::new()),
        Arc::new(Validator::default()),
        Arc::new(ScriptedSubmitter::new()),
        Arc::new(SubmissionQueue::new()),
        Arc::new(ReplyDispatcher::new()),
    );

    let outcome = pipeline
        .handle(RawCommand::new("create market: Up/Down", OriginChannel::Telegram, "9"))
        .await;
    assert!(outcome.is_success());
    assert!(!outcome.reply_delivered);
}
