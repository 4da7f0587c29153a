//! Market creation request types.
//!
//! A [`MarketDraft`] is whatever an extractor managed to pull out of a message.
//! Only the validator turns a draft into a [`ParsedMarketRequest`], so a request
//! in hand always satisfies the submission invariants: both options present and
//! distinct, and a positive duration.

use std::fmt;

use serde::Serialize;

/// Category applied when the command names none.
pub const DEFAULT_CATEGORY: &str = "SOCIAL";

/// Market fee applied when the command names none (1%).
pub const DEFAULT_FEE_BASIS_POINTS: u32 = 100;

/// Upper bound for the market fee (100%).
pub const MAX_FEE_BASIS_POINTS: u32 = 10_000;

/// Market duration applied when the command names none.
pub const DEFAULT_DURATION_DAYS: u64 = 7;

/// Seconds in one day.
pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Unvalidated market fields as produced by an extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketDraft {
    pub question: Option<String>,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    /// Whole days; converted to seconds during validation.
    pub duration_days: Option<u64>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub fee_basis_points: Option<u32>,
}

impl MarketDraft {
    /// Draft carrying only a question and its two options.
    pub fn with_options(
        question: impl Into<String>,
        option_a: impl Into<String>,
        option_b: impl Into<String>,
    ) -> Self {
        Self {
            question: Some(question.into()),
            option_a: Some(option_a.into()),
            option_b: Some(option_b.into()),
            ..Self::default()
        }
    }
}

/// A validated, default-filled market creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedMarketRequest {
    question: String,
    option_a: String,
    option_b: String,
    duration_seconds: u64,
    category: String,
    tags: Vec<String>,
    fee_basis_points: u32,
}

impl ParsedMarketRequest {
    /// Assemble a request from already-validated parts.
    pub(crate) fn from_validated(
        question: String,
        option_a: String,
        option_b: String,
        duration_seconds: u64,
        category: String,
        tags: Vec<String>,
        fee_basis_points: u32,
    ) -> Self {
        debug_assert!(duration_seconds > 0);
        Self {
            question,
            option_a,
            option_b,
            duration_seconds,
            category,
            tags,
            fee_basis_points,
        }
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn option_a(&self) -> &str {
        &self.option_a
    }

    #[must_use]
    pub fn option_b(&self) -> &str {
        &self.option_b
    }

    #[must_use]
    pub const fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub const fn fee_basis_points(&self) -> u32 {
        self.fee_basis_points
    }
}

/// Where a submission's market id came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketIdSource {
    /// Decoded from the contract's creation event in the receipt.
    Event,
    /// Read as `marketCount() - 1` after confirmation. Racy under concurrent creation.
    Counter,
}

impl fmt::Display for MarketIdSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Event => write!(f, "event"),
            Self::Counter => write!(f, "counter"),
        }
    }
}

/// Outcome of a confirmed market creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub market_id: u64,
    pub transaction_hash: String,
    #[serde(skip)]
    pub id_source: MarketIdSource,
}
