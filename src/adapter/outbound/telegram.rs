//! Telegram reply delivery.
//!
//! Requires the `telegram` feature to be enabled.

use async_trait::async_trait;
use teloxide::prelude::*;

use crate::error::DeliveryError;
use crate::port::outbound::reply::{Reply, ReplySink};

/// Sends replies to Telegram chats; the origin id is the numeric chat id.
#[derive(Clone)]
pub struct TelegramReplySink {
    bot: Bot,
}

impl TelegramReplySink {
    #[must_use]
    pub const fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

/// Parse a chat id as stored in a command's origin id.
///
/// # Errors
///
/// Returns [`DeliveryError::InvalidOrigin`] when `origin_id` is not an integer.
pub fn chat_id(origin_id: &str) -> Result<ChatId, DeliveryError> {
    origin_id
        .parse::<i64>()
        .map(ChatId)
        .map_err(|_| DeliveryError::InvalidOrigin(origin_id.to_string()))
}

#[async_trait]
impl ReplySink for TelegramReplySink {
    fn platform(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, origin_id: &str, reply: &Reply) -> Result<(), DeliveryError> {
        let chat = chat_id(origin_id)?;
        self.bot
            .send_message(chat, &reply.text)
            .await
            .map_err(|e| DeliveryError::Rejected {
                platform: "telegram",
                reason: e.to_string(),
            })?;
        Ok(())
    }
}
