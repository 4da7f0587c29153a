//! Deposit command parsing.
//!
//! Handles `/deposit <strategy> <amount>` and plain sentences such as
//! "deposit 0.5 BTC into solv". The parser only finds candidate values;
//! the validator decides whether they are acceptable.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::{DepositDraft, DepositStrategy};

/// Chat command that starts a deposit.
pub const DEPOSIT_COMMAND: &str = "/deposit";

const FILLER: [&str; 6] = ["btc", "into", "in", "to", "the", "strategy"];

/// Strip a leading `/deposit` or `/deposit@bot` command, if present.
fn strip_command(text: &str) -> Option<&str> {
    let trimmed = text.trim_start();
    let head = trimmed.split_whitespace().next()?;
    let command = head.split_once('@').map_or(head, |(name, _)| name);
    command
        .eq_ignore_ascii_case(DEPOSIT_COMMAND)
        .then(|| &trimmed[head.len()..])
}

fn is_filler(word: &str) -> bool {
    FILLER.iter().any(|f| f.eq_ignore_ascii_case(word))
}

fn clean(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_ascii_alphanumeric() && c != '.' && c != '-')
        .trim_end_matches('.')
}

/// Find a strategy name and an amount in `text`.
///
/// In command form the first non-numeric argument is reported as the
/// strategy even when it is unknown, so the user hears which name was
/// rejected. In free text only known strategy names are picked up.
#[must_use]
pub fn parse_deposit(text: &str) -> DepositDraft {
    let (body, is_command) = match strip_command(text) {
        Some(args) => (args, true),
        None => (text, false),
    };

    let words: Vec<&str> = body
        .split_whitespace()
        .map(clean)
        .filter(|w| !w.is_empty())
        .collect();

    let amount = words.iter().find_map(|w| Decimal::from_str(w).ok());

    let known = words
        .iter()
        .find(|w| DepositStrategy::from_str(w).is_ok())
        .map(|w| w.to_string());

    let strategy = known.or_else(|| {
        if !is_command {
            return None;
        }
        words
            .iter()
            .find(|w| Decimal::from_str(w).is_err() && !is_filler(w))
            .map(|w| w.to_string())
    });

    DepositDraft { strategy, amount }
}

/// Whether `text` is a `/deposit` command.
#[must_use]
pub fn is_deposit_command(text: &str) -> bool {
    strip_command(text).is_some()
}
