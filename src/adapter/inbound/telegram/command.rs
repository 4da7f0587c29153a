//! Telegram command parsing.

use crate::application::extract::grammar::has_create_marker;

/// Supported Telegram commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelegramCommand {
    Start,
    Help,
    /// Market request; the full message text goes to the pipeline.
    Create,
    /// Deposit request; the full message text goes to the deposit parser.
    Deposit,
}

/// Parse error for Telegram messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    NotACommand,
    UnknownCommand(String),
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotACommand => write!(f, "message is not a command"),
            Self::UnknownCommand(cmd) => write!(f, "unknown command `{cmd}`"),
        }
    }
}

impl std::error::Error for CommandParseError {}

/// Parse a Telegram message into a bot command.
///
/// A plain message carrying the `create market:` phrase counts as
/// [`TelegramCommand::Create`].
pub fn parse_command(text: &str) -> Result<TelegramCommand, CommandParseError> {
    let Some(raw_command) = text.split_whitespace().next() else {
        return Err(CommandParseError::NotACommand);
    };
    if !raw_command.starts_with('/') {
        return if has_create_marker(text) {
            Ok(TelegramCommand::Create)
        } else {
            Err(CommandParseError::NotACommand)
        };
    }

    let command = raw_command
        .split_once('@')
        .map_or(raw_command, |(head, _)| head)
        .to_ascii_lowercase();

    match command.as_str() {
        "/start" => Ok(TelegramCommand::Start),
        "/help" => Ok(TelegramCommand::Help),
        "/create" => Ok(TelegramCommand::Create),
        "/deposit" => Ok(TelegramCommand::Deposit),
        _ => Err(CommandParseError::UnknownCommand(command)),
    }
}

/// Help text returned by `/start` and `/help`.
#[must_use]
pub const fn command_help() -> &'static str {
    "Welcome to the Prediction Market Bot!\n\n\
    Create a market with either format:\n\
    /create \"Your question here\" Options: Option1/Option2\n\
    /create Option1/Option2\n\n\
    Example:\n\
    /create \"Will GPT-5 pass the Turing Test by 2026?\" Options: Yes/No\n\n\
    Deposit into a strategy:\n\
    /deposit <strategy> <amount>\n\
    Strategies: Segment, Solv, Avalon, Bedrock, Pell, Ionic"
}

/// Bot commands for Telegram menu registration.
///
/// Returns tuples of (command, description) for `set_my_commands`.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("create", "Create a prediction market"),
        ("deposit", "Deposit BTC into a strategy"),
        ("help", "Show usage"),
    ]
}
