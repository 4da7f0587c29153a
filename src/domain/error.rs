//! Recoverable, user-facing failures of the extraction and validation stages.
//!
//! Both types carry a [`remediation`](ValidationFailure::remediation) message
//! that is sent back to the user verbatim.

use thiserror::Error;

use super::command::OriginChannel;

/// Usage text listing the two accepted market formats.
pub const MARKET_FORMAT_HELP: &str = "To create a prediction market, use one of these formats:\n\
1. create market: \"Your question?\" Options: Option1/Option2\n\
2. create market: Option1/Option2";

/// The same formats spelled as bot commands.
pub const TELEGRAM_FORMAT_HELP: &str = "To create a prediction market, use one of these formats:\n\
1. /create \"Your question?\" Options: Option1/Option2\n\
2. /create Option1/Option2";

/// Usage text in the syntax `channel` accepts.
#[must_use]
pub const fn format_help(channel: OriginChannel) -> &'static str {
    match channel {
        OriginChannel::Telegram => TELEGRAM_FORMAT_HELP,
        OriginChannel::Twitter | OriginChannel::Chat => MARKET_FORMAT_HELP,
    }
}

/// The extractor could not produce a draft from the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionFailure {
    /// None of the grammar patterns matched.
    #[error("message matches no market format")]
    NoMatch,

    /// The language model answered but left required fields empty.
    #[error("model output is missing {}", .missing.join(", "))]
    Incomplete { missing: Vec<&'static str> },

    /// The language model call failed or returned unusable output.
    #[error("model extraction failed: {0}")]
    Model(String),
}

impl ExtractionFailure {
    /// Message telling the user how to fix the command.
    #[must_use]
    pub fn remediation(&self) -> String {
        self.remediation_for(OriginChannel::Chat)
    }

    /// [`remediation`](Self::remediation) with usage text for `channel`.
    #[must_use]
    pub fn remediation_for(&self, channel: OriginChannel) -> String {
        let help = format_help(channel);
        match self {
            Self::NoMatch => help.to_string(),
            Self::Incomplete { missing } => format!(
                "Error: Missing required market parameters ({}). Please provide question, options, and duration.",
                missing.join(", ")
            ),
            Self::Model(_) => format!(
                "Sorry, I couldn't work out the market details from that message.\n\n{help}"
            ),
        }
    }
}

/// A draft or deposit request violated a domain rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("options must differ, got `{0}` twice")]
    IdenticalOptions(String),

    #[error("duration must be at least one day")]
    InvalidDuration,

    #[error("fee {0} exceeds 10000 basis points")]
    InvalidFee(u32),

    #[error("deposit amount must be greater than 0")]
    InvalidAmount,

    #[error("unknown strategy `{0}`")]
    InvalidStrategy(String),
}

impl ValidationFailure {
    /// Message telling the user how to fix the command.
    #[must_use]
    pub fn remediation(&self) -> String {
        match self {
            Self::MissingFields(fields) => format!(
                "Error: Missing required market parameters ({}). Please provide question, options, and duration.",
                fields.join(", ")
            ),
            Self::IdenticalOptions(option) => format!(
                "Both options are \"{option}\". Please give two different options, e.g. Yes/No."
            ),
            Self::InvalidDuration => {
                "Please specify a market duration of at least 1 day.".to_string()
            }
            Self::InvalidFee(_) => {
                "Please specify a market fee between 0 and 10000 basis points (100 = 1%).".to_string()
            }
            Self::InvalidAmount => "Please specify a valid amount greater than 0.".to_string(),
            Self::InvalidStrategy(_) => {
                "Please specify a valid strategy (Segment, Solv, Avalon, Bedrock, Pell, or Ionic)."
                    .to_string()
            }
        }
    }
}
