//! Structural command grammar.
//!
//! Patterns are tried in strict priority order and the first match wins:
//!
//! 1. `"<question>" Options: <A>/<B>`
//! 2. `"<question>" <A>/<B>`
//! 3. `<A>/<B>` with a synthetic question
//!
//! Matching is case-insensitive and every capture is trimmed.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use super::Extractor;
use crate::domain::{ExtractionFailure, MarketDraft};

/// Marker preceding the market body in mentions (`@bot create market: ...`).
pub const CREATE_MARKET_MARKER: &str = "create market:";

/// Chat command preceding the market body (`/create ...`).
pub const CREATE_COMMAND: &str = "/create";

static LABELED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)"([^"]+)"\s*Options:\s*([^/]+)/([^/\n]+)"#).expect("labeled pattern")
});

static UNLABELED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)"([^"]+)"\s*([^/]+)/([^/\n]+)"#).expect("unlabeled pattern")
});

static OPTIONS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^/]+)/([^/\n]+)").expect("options pattern"));

/// Which grammar rule produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarPattern {
    /// Quoted question with an explicit `Options:` label.
    Labeled,
    /// Quoted question, options without a label.
    Unlabeled,
    /// Options only; the question was synthesized.
    OptionsOnly,
}

/// A successful grammar match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarMatch {
    pub pattern: GrammarPattern,
    pub draft: MarketDraft,
}

/// Question generated when a command supplies only the two options.
#[must_use]
pub fn synthetic_question(option_a: &str, option_b: &str) -> String {
    format!("Which will win: {option_a} or {option_b}?")
}

/// Extracts market drafts using the structural grammar only.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrammarExtractor;

impl GrammarExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Match `text` against the grammar, reporting which pattern won.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionFailure::NoMatch`] when no pattern matches.
    pub fn parse(&self, text: &str) -> Result<GrammarMatch, ExtractionFailure> {
        let content = strip_trigger(text);

        if let Some(caps) = LABELED.captures(content) {
            return Ok(GrammarMatch {
                pattern: GrammarPattern::Labeled,
                draft: MarketDraft::with_options(
                    caps[1].trim(),
                    caps[2].trim(),
                    caps[3].trim(),
                ),
            });
        }

        if let Some(caps) = UNLABELED.captures(content) {
            return Ok(GrammarMatch {
                pattern: GrammarPattern::Unlabeled,
                draft: MarketDraft::with_options(
                    caps[1].trim(),
                    caps[2].trim(),
                    caps[3].trim(),
                ),
            });
        }

        if let Some(caps) = OPTIONS_ONLY.captures(content) {
            let option_a = caps[1].trim();
            let option_b = caps[2].trim();
            return Ok(GrammarMatch {
                pattern: GrammarPattern::OptionsOnly,
                draft: MarketDraft::with_options(
                    synthetic_question(option_a, option_b),
                    option_a,
                    option_b,
                ),
            });
        }

        Err(ExtractionFailure::NoMatch)
    }
}

#[async_trait]
impl Extractor for GrammarExtractor {
    fn name(&self) -> &'static str {
        "grammar"
    }

    async fn extract(&self, text: &str) -> Result<MarketDraft, ExtractionFailure> {
        let matched = self.parse(text)?;
        debug!(pattern = ?matched.pattern, "Grammar matched");
        Ok(matched.draft)
    }
}

/// Whether `text` carries the `create market:` marker.
#[must_use]
pub fn has_create_marker(text: &str) -> bool {
    text.to_ascii_lowercase().contains(CREATE_MARKET_MARKER)
}

/// Return the market body following the trigger, or the whole text when no
/// trigger is present.
///
/// Stripping `create market:` takes everything after its first occurrence, so
/// leading mentions (`@bot create market: ...`) are dropped with it.
#[must_use]
pub fn strip_trigger(text: &str) -> &str {
    // ASCII lowering keeps byte offsets aligned with `text`.
    if let Some(index) = text.to_ascii_lowercase().find(CREATE_MARKET_MARKER) {
        return text[index + CREATE_MARKET_MARKER.len()..].trim();
    }

    let trimmed = text.trim_start();
    if let Some(rest) = strip_command(trimmed) {
        return rest.trim();
    }

    text.trim()
}

/// Strip a leading `/create` or `/create@botname` command.
fn strip_command(text: &str) -> Option<&str> {
    let head = text.get(..CREATE_COMMAND.len())?;
    if !head.eq_ignore_ascii_case(CREATE_COMMAND) {
        return None;
    }

    let rest = &text[CREATE_COMMAND.len()..];
    if let Some(mention) = rest.strip_prefix('@') {
        return Some(
            mention
                .split_once(char::is_whitespace)
                .map_or("", |(_, body)| body),
        );
    }
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        return Some(rest);
    }
    None
}
