#![allow(dead_code)]

pub mod recording_reply;
pub mod scripted_submitter;

use std::sync::Arc;

use marketcast::application::extract::GrammarExtractor;
use marketcast::application::{
    Pipeline, ReplyDispatcher, ReplyFormatter, SubmissionQueue, Validator,
};
use marketcast::domain::OriginChannel;
use url::Url;

use recording_reply::RecordingReplySink;
use scripted_submitter::ScriptedSubmitter;

/// Every channel routed to one recording sink.
pub fn dispatcher(sink: Arc<RecordingReplySink>) -> ReplyDispatcher {
    ReplyDispatcher::new()
        .with_sink(OriginChannel::Twitter, sink.clone())
        .with_sink(OriginChannel::Telegram, sink.clone())
        .with_sink(OriginChannel::Chat, sink)
}

/// Grammar pipeline replying to `sink` on every channel.
pub fn pipeline(submitter: Arc<ScriptedSubmitter>, sink: Arc<RecordingReplySink>) -> Pipeline {
    let frontend = Url::parse("https://markets.example.org").ok();

    Pipeline::new(
        Arc::new(GrammarExtractor::new()),
        Arc::new(Validator::default()),
        submitter,
        Arc::new(SubmissionQueue::new()),
        Arc::new(dispatcher(sink)),
    )
    .with_formatter(Arc::new(ReplyFormatter::new(frontend)))
}
