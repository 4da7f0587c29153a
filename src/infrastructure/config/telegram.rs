//! Telegram surface configuration.

use serde::Deserialize;

const fn default_true() -> bool {
    true
}

/// `[telegram]` section.
#[derive(Clone, Deserialize)]
pub struct TelegramConfig {
    /// Start the Telegram bot. Requires `TELEGRAM_BOT_TOKEN`.
    #[serde(default)]
    pub enabled: bool,
    /// Publish `/create`, `/deposit` and `/help` in the bot menu at startup.
    #[serde(default = "default_true")]
    pub register_commands: bool,
    /// Bot token, from the environment only.
    #[serde(skip)]
    pub token: Option<String>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            register_commands: default_true(),
            token: None,
        }
    }
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("enabled", &self.enabled)
            .field("register_commands", &self.register_commands)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
