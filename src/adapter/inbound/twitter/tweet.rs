//! Filtered-stream payloads and mention classification.

use serde::Deserialize;

use crate::application::extract::grammar::has_create_marker;

/// One line of the filtered stream.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamEnvelope {
    pub data: Option<Tweet>,
    #[serde(default)]
    pub includes: Includes,
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    pub author_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Includes {
    #[serde(default)]
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

impl StreamEnvelope {
    /// Username of the tweet's author, when the expansion was returned.
    #[must_use]
    pub fn author_username(&self) -> Option<&str> {
        let author = self.data.as_ref()?.author_id.as_deref()?;
        self.includes
            .users
            .iter()
            .find(|u| u.id == author)
            .map(|u| u.username.as_str())
    }
}

/// What the bot should do with a tweet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweetAction {
    /// Not addressed to the bot, or written by it.
    Ignore,
    /// A mention without the trigger phrase: answer with usage.
    Usage,
    /// A market request to run through the pipeline.
    Create,
}

/// Decide how to treat `envelope` for the account `username`.
#[must_use]
pub fn classify(envelope: &StreamEnvelope, username: &str) -> TweetAction {
    let Some(tweet) = &envelope.data else {
        return TweetAction::Ignore;
    };
    if envelope
        .author_username()
        .is_some_and(|author| author.eq_ignore_ascii_case(username))
    {
        return TweetAction::Ignore;
    }

    let mention = format!("@{}", username.to_ascii_lowercase());
    if !tweet.text.to_ascii_lowercase().contains(&mention) {
        return TweetAction::Ignore;
    }
    if has_create_marker(&tweet.text) {
        TweetAction::Create
    } else {
        TweetAction::Usage
    }
}

/// Reply sent to mentions that lack the trigger phrase.
#[must_use]
pub fn usage_text(username: &str) -> String {
    format!(
        "To create a prediction market, use the format:\n\
         @{username} create market: \"Your question?\" Options: Option1/Option2"
    )
}

/// Splits a chunked byte stream into complete newline-terminated lines.
///
/// Keep-alive blank lines are dropped.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    /// Append `chunk` and return every line it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&line);
            let text = text.trim();
            if !text.is_empty() {
                lines.push(text.to_string());
            }
        }
        lines
    }
}
