//! Inbound command envelope shared by every source adapter.

use std::fmt;

use serde::Serialize;

/// Social surface a command arrived from and a reply must return to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginChannel {
    /// Microblogging mention stream.
    Twitter,
    /// Chat-bot command.
    Telegram,
    /// Conversational agent action.
    Chat,
}

impl fmt::Display for OriginChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Twitter => write!(f, "twitter"),
            Self::Telegram => write!(f, "telegram"),
            Self::Chat => write!(f, "chat"),
        }
    }
}

/// A platform event normalized into plain text plus its reply address.
///
/// Created once per inbound event and discarded when the pipeline run ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommand {
    text: String,
    origin_channel: OriginChannel,
    origin_id: String,
}

impl RawCommand {
    /// Create a new command.
    pub fn new(
        text: impl Into<String>,
        origin_channel: OriginChannel,
        origin_id: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            origin_channel,
            origin_id: origin_id.into(),
        }
    }

    /// Raw message text as received.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Surface this command came from.
    #[must_use]
    pub const fn origin_channel(&self) -> OriginChannel {
        self.origin_channel
    }

    /// Conversation identifier replies are addressed to (tweet id, chat id, room id).
    #[must_use]
    pub fn origin_id(&self) -> &str {
        &self.origin_id
    }
}
