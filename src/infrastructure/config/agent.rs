//! Bot identity configuration.

use serde::Deserialize;

/// `[agent]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentConfig {
    /// Account name mentions are addressed to, without the leading `@`.
    /// Overridden by `AGENT_USERNAME`.
    #[serde(default)]
    pub username: String,
    /// Base URL of the market frontend used in success replies.
    /// Overridden by `FRONTEND_URL`.
    #[serde(default)]
    pub frontend_url: Option<String>,
}

impl AgentConfig {
    /// Username with any leading `@` removed.
    #[must_use]
    pub fn handle(&self) -> &str {
        self.username.trim().trim_start_matches('@')
    }
}
