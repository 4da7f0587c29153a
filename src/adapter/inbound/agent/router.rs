//! Local stand-in for the host's action dispatch.

use std::sync::Arc;

use tracing::debug;

use super::action::{AgentAction, AgentMessage};

/// Picks the first registered action whose `validate` accepts a message.
#[derive(Clone, Default)]
pub struct AgentRouter {
    actions: Vec<Arc<dyn AgentAction>>,
}

impl AgentRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` after those already registered.
    #[must_use]
    pub fn with_action(mut self, action: Arc<dyn AgentAction>) -> Self {
        self.actions.push(action);
        self
    }

    /// Registered action names, in priority order.
    pub fn names(&self) -> Vec<&'static str> {
        self.actions.iter().map(|a| a.name()).collect()
    }

    /// Action that would handle `message`.
    pub fn select(&self, message: &AgentMessage) -> Option<&Arc<dyn AgentAction>> {
        self.actions.iter().find(|a| a.validate(message))
    }

    /// Look up an action by name or simile.
    pub fn by_name(&self, name: &str) -> Option<&Arc<dyn AgentAction>> {
        self.actions
            .iter()
            .find(|a| a.name() == name || a.similes().iter().any(|s| *s == name))
    }

    /// Run the selected action.
    ///
    /// Returns the action's name and result, or `None` if nothing matched.
    pub async fn dispatch(&self, message: &AgentMessage) -> Option<(&'static str, bool)> {
        let action = self.select(message)?;
        debug!(action = action.name(), room = %message.room_id, "Dispatching agent action");
        Some((action.name(), action.handle(message).await))
    }

    /// Run the action registered under `name` (or a simile), skipping `validate`.
    pub async fn dispatch_to(
        &self,
        name: &str,
        message: &AgentMessage,
    ) -> Option<(&'static str, bool)> {
        let action = self.by_name(name)?;
        debug!(action = action.name(), room = %message.room_id, "Invoking agent action by name");
        Some((action.name(), action.handle(message).await))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    struct Fixed {
        name: &'static str,
        accepts: bool,
    }

    #[async_trait]
    impl AgentAction for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }

        fn similes(&self) -> &'static [&'static str] {
            &["ALIAS"]
        }

        fn description(&self) -> &'static str {
            "test"
        }

        fn validate(&self, _message: &AgentMessage) -> bool {
            self.accepts
        }

        async fn handle(&self, _message: &AgentMessage) -> bool {
            true
        }
    }

    fn router() -> AgentRouter {
        AgentRouter::new()
            .with_action(Arc::new(Fixed {
                name: "PICKY",
                accepts: false,
            }))
            .with_action(Arc::new(Fixed {
                name: "FALLBACK",
                accepts: true,
            }))
    }

    #[tokio::test]
    async fn first_accepting_action_wins() {
        let result = router().dispatch(&AgentMessage::new("r", "anything")).await;
        assert_eq!(result, Some(("FALLBACK", true)));
    }

    #[test]
    fn lookup_by_name_and_simile() {
        let router = router();
        assert_eq!(router.by_name("PICKY").map(|a| a.name()), Some("PICKY"));
        assert_eq!(router.by_name("ALIAS").map(|a| a.name()), Some("PICKY"));
        assert!(router.by_name("MISSING").is_none());
        assert_eq!(router.names(), vec!["PICKY", "FALLBACK"]);
    }

    #[tokio::test]
    async fn named_dispatch_bypasses_validation() {
        let router = router();
        let message = AgentMessage::new("r", "anything");
        assert_eq!(router.dispatch_to("ALIAS", &message).await, Some(("PICKY", true)));
        assert_eq!(router.dispatch_to("MISSING", &message).await, None);
    }

    #[tokio::test]
    async fn empty_router_matches_nothing() {
        let result = AgentRouter::new().dispatch(&AgentMessage::new("r", "hi")).await;
        assert_eq!(result, None);
    }
}
