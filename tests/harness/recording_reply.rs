use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use marketcast::error::DeliveryError;
use marketcast::port::outbound::reply::{Reply, ReplySink};

/// Thread-safe reply collector for delivery assertions in tests.
#[derive(Clone, Default)]
pub struct RecordingReplySink {
    replies: Arc<Mutex<Vec<(String, Reply)>>>,
    reject: bool,
}

impl RecordingReplySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that records every reply and then refuses it.
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.replies.lock().expect("lock replies").len()
    }

    pub fn replies(&self) -> Vec<(String, Reply)> {
        self.replies.lock().expect("lock replies").clone()
    }

    pub fn only(&self) -> (String, Reply) {
        let replies = self.replies();
        assert_eq!(replies.len(), 1, "expected exactly one reply");
        replies.into_iter().next().expect("one reply")
    }
}

#[async_trait]
impl ReplySink for RecordingReplySink {
    fn platform(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, origin_id: &str, reply: &Reply) -> Result<(), DeliveryError> {
        self.replies
            .lock()
            .expect("lock replies")
            .push((origin_id.to_string(), reply.clone()));
        if self.reject {
            return Err(DeliveryError::Closed);
        }
        Ok(())
    }
}
