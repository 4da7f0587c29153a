//! Filtered-stream listener.
//!
//! Keeps one long-lived connection to the X API filtered stream, turning
//! each matching tweet into a pipeline run. Disconnects are retried with
//! exponential backoff; the listener only stops when its task is dropped.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use super::tweet::{classify, usage_text, LineBuffer, StreamEnvelope, TweetAction};
use crate::adapter::outbound::twitter::TwitterApi;
use crate::application::reply::ReplyDispatcher;
use crate::domain::{OriginChannel, RawCommand};
use crate::error::{Error, Result};
use crate::infrastructure::config::twitter::TwitterConfig;
use crate::port::inbound::command::MarketCommandHandler;
use crate::port::outbound::reply::Reply;

/// Query parameters requesting the author expansion.
const STREAM_PARAMS: [(&str, &str); 3] = [
    ("expansions", "author_id"),
    ("tweet.fields", "author_id"),
    ("user.fields", "username"),
];

/// Routes tweets from the filtered stream into the pipeline.
pub struct TwitterListener {
    api: TwitterApi,
    config: TwitterConfig,
    username: String,
    handler: Arc<dyn MarketCommandHandler>,
    dispatcher: Arc<ReplyDispatcher>,
}

impl TwitterListener {
    pub fn new(
        api: TwitterApi,
        config: TwitterConfig,
        username: impl Into<String>,
        handler: Arc<dyn MarketCommandHandler>,
        dispatcher: Arc<ReplyDispatcher>,
    ) -> Self {
        Self {
            api,
            config,
            username: username.into(),
            handler,
            dispatcher,
        }
    }

    /// Listen until the task is cancelled.
    pub async fn run(self) {
        if let Err(e) = self.api.ensure_mention_rule(&self.username).await {
            warn!(error = %e, "Failed to install stream rule");
        }

        let mut attempt = 0u32;
        loop {
            match self.listen_once().await {
                Ok(received) => {
                    if received {
                        attempt = 0;
                    }
                    warn!("Twitter stream closed");
                }
                Err(e) => error!(error = %e, "Twitter stream failed"),
            }

            let delay = self.config.reconnect_delay(attempt);
            info!(
                delay_ms = delay.as_millis() as u64,
                attempt = attempt + 1,
                "Reconnecting after delay"
            );
            sleep(delay).await;
            attempt = attempt.saturating_add(1);
        }
    }

    /// Hold one stream connection until it ends.
    ///
    /// Returns whether any data arrived, which resets the backoff.
    async fn listen_once(&self) -> Result<bool> {
        let response = self
            .api
            .http()
            .get(&self.config.stream_url)
            .query(&STREAM_PARAMS)
            .bearer_auth(self.api.bearer_token())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Connection(format!("stream rejected ({status}): {body}")));
        }
        info!(username = %self.username, "Connected to Twitter stream");

        let mut received = false;
        let mut lines = LineBuffer::default();
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            received = true;
            for line in lines.push(&chunk) {
                self.dispatch_line(&line).await;
            }
        }
        Ok(received)
    }

    async fn dispatch_line(&self, line: &str) {
        let envelope: StreamEnvelope = match serde_json::from_str(line) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(error = %e, "Unparseable stream line");
                return;
            }
        };
        if !envelope.errors.is_empty() {
            warn!(errors = ?envelope.errors, "Stream reported errors");
        }
        self.dispatch(envelope).await;
    }

    /// Act on one stream payload.
    pub async fn dispatch(&self, envelope: StreamEnvelope) {
        let action = classify(&envelope, &self.username);
        let Some(tweet) = envelope.data else {
            return;
        };

        match action {
            TweetAction::Ignore => debug!(tweet_id = %tweet.id, "Ignoring tweet"),
            TweetAction::Usage => {
                let reply = Reply::text(usage_text(&self.username));
                self.dispatcher
                    .reply(OriginChannel::Twitter, &tweet.id, &reply)
                    .await;
            }
            TweetAction::Create => {
                info!(tweet_id = %tweet.id, "Market request received");
                let handler = Arc::clone(&self.handler);
                let command = RawCommand::new(tweet.text, OriginChannel::Twitter, tweet.id);
                tokio::spawn(async move {
                    handler.handle(command).await;
                });
            }
        }
    }
}
