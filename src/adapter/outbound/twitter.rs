//! X API v2 REST client: stream rules and replies.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{DeliveryError, Error, Result};
use crate::infrastructure::config::twitter::TwitterConfig;
use crate::port::outbound::reply::{Reply, ReplySink};

/// Longest tweet the API accepts, in characters.
pub const MAX_TWEET_CHARS: usize = 280;

/// Authenticated X API client.
///
/// The bearer token authorizes stream and rule calls; the user token
/// authorizes posting replies as the bot account.
#[derive(Clone)]
pub struct TwitterApi {
    client: Client,
    api_url: String,
    bearer_token: String,
    user_token: String,
}

/// A filtered-stream rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RulesResponse {
    #[serde(default)]
    data: Vec<StreamRule>,
}

#[derive(Debug, Serialize)]
struct AddRules<'a> {
    add: &'a [StreamRule],
}

#[derive(Debug, Serialize)]
struct TweetRequest<'a> {
    text: &'a str,
    reply: InReplyTo<'a>,
}

#[derive(Debug, Serialize)]
struct InReplyTo<'a> {
    in_reply_to_tweet_id: &'a str,
}

impl TwitterApi {
    /// Create a client from the `[twitter]` section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if a token is missing or the HTTP
    /// client cannot be built.
    pub fn from_config(config: &TwitterConfig) -> Result<Self> {
        let bearer_token = config
            .bearer_token
            .clone()
            .ok_or_else(|| Error::Connection("TWITTER_BEARER_TOKEN not set".into()))?;
        let user_token = config
            .user_token
            .clone()
            .ok_or_else(|| Error::Connection("TWITTER_USER_TOKEN not set".into()))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Connection(e.to_string()))?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            bearer_token,
            user_token,
        })
    }

    fn rules_url(&self) -> String {
        format!("{}/2/tweets/search/stream/rules", self.api_url)
    }

    /// Bearer token for the stream connection.
    pub(crate) fn bearer_token(&self) -> &str {
        &self.bearer_token
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// Currently installed stream rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    pub async fn rules(&self) -> Result<Vec<StreamRule>> {
        let response = self
            .client
            .get(self.rules_url())
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Connection(format!("rules lookup failed ({status}): {body}")));
        }

        let rules: RulesResponse = response.json().await?;
        Ok(rules.data)
    }

    /// Install `rules` on the filtered stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    pub async fn add_rules(&self, rules: &[StreamRule]) -> Result<()> {
        let response = self
            .client
            .post(self.rules_url())
            .bearer_auth(&self.bearer_token)
            .json(&AddRules { add: rules })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Connection(format!("rule install failed ({status}): {body}")));
        }
        Ok(())
    }

    /// Install the mention rule for `username` unless rules already exist.
    ///
    /// Returns whether a rule was added.
    ///
    /// # Errors
    ///
    /// Returns an error if the rules cannot be read or written.
    pub async fn ensure_mention_rule(&self, username: &str) -> Result<bool> {
        let existing = self.rules().await?;
        if !existing.is_empty() {
            debug!(count = existing.len(), "Stream rules already installed");
            return Ok(false);
        }

        let rule = mention_rule(username);
        self.add_rules(std::slice::from_ref(&rule)).await?;
        info!(rule = %rule.value, "Installed stream rule");
        Ok(true)
    }

    /// Post `text` as a reply to `tweet_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] if the request fails or is rejected.
    pub async fn post_reply(
        &self,
        tweet_id: &str,
        text: &str,
    ) -> std::result::Result<(), DeliveryError> {
        if tweet_id.is_empty() || !tweet_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DeliveryError::InvalidOrigin(tweet_id.to_string()));
        }

        let text = truncate_tweet(text);
        let response = self
            .client
            .post(format!("{}/2/tweets", self.api_url))
            .bearer_auth(&self.user_token)
            .json(&TweetRequest {
                text: &text,
                reply: InReplyTo {
                    in_reply_to_tweet_id: tweet_id,
                },
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected {
                platform: "twitter",
                reason: format!("{status}: {body}"),
            });
        }
        Ok(())
    }
}

/// Stream rule matching market requests addressed to `username`.
#[must_use]
pub fn mention_rule(username: &str) -> StreamRule {
    StreamRule {
        id: None,
        value: format!("@{username} \"create market:\""),
        tag: Some("market-requests".into()),
    }
}

/// Cut `text` to the tweet length limit on a character boundary.
#[must_use]
pub fn truncate_tweet(text: &str) -> String {
    if text.chars().count() <= MAX_TWEET_CHARS {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(MAX_TWEET_CHARS - 1).collect();
    cut.push('…');
    cut
}

#[async_trait]
impl ReplySink for TwitterApi {
    fn platform(&self) -> &'static str {
        "twitter"
    }

    async fn send(&self, origin_id: &str, reply: &Reply) -> std::result::Result<(), DeliveryError> {
        self.post_reply(origin_id, &reply.text).await
    }
}
