//! Callback delivery for the conversational surface.
//!
//! The agent host does not receive replies synchronously; each reply is
//! pushed onto a channel tagged with the room it belongs to, and the host
//! drains the receiving end.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::DeliveryError;
use crate::port::outbound::reply::{Reply, ReplySink};

/// A reply addressed to one conversation room.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentReply {
    pub room_id: String,
    pub reply: Reply,
}

/// Receiving end of the agent callback channel.
pub type AgentReplies = mpsc::UnboundedReceiver<AgentReply>;

/// Forwards replies to the agent host's callback channel.
#[derive(Clone)]
pub struct CallbackSink {
    sender: mpsc::UnboundedSender<AgentReply>,
}

impl CallbackSink {
    /// Create a sink and the receiver the host reads replies from.
    #[must_use]
    pub fn channel() -> (Self, AgentReplies) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl ReplySink for CallbackSink {
    fn platform(&self) -> &'static str {
        "chat"
    }

    async fn send(&self, origin_id: &str, reply: &Reply) -> Result<(), DeliveryError> {
        self.sender
            .send(AgentReply {
                room_id: origin_id.to_string(),
                reply: reply.clone(),
            })
            .map_err(|_| DeliveryError::Closed)
    }
}
