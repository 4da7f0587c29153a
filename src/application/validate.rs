//! Draft validation and default filling.

use rust_decimal::Decimal;

use crate::domain::market::{
    DEFAULT_CATEGORY, DEFAULT_DURATION_DAYS, DEFAULT_FEE_BASIS_POINTS, MAX_FEE_BASIS_POINTS,
    SECONDS_PER_DAY,
};
use crate::domain::{
    DepositDraft, DepositIntent, DepositStrategy, MarketDraft, ParsedMarketRequest,
    ValidationFailure,
};

/// Values filled in when a draft leaves a field unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketDefaults {
    pub duration_days: u64,
    pub category: String,
    pub fee_basis_points: u32,
}

impl Default for MarketDefaults {
    fn default() -> Self {
        Self {
            duration_days: DEFAULT_DURATION_DAYS,
            category: DEFAULT_CATEGORY.to_string(),
            fee_basis_points: DEFAULT_FEE_BASIS_POINTS,
        }
    }
}

/// The only path from a [`MarketDraft`] to a [`ParsedMarketRequest`].
#[derive(Debug, Clone, Default)]
pub struct Validator {
    defaults: MarketDefaults,
}

impl Validator {
    #[must_use]
    pub const fn new(defaults: MarketDefaults) -> Self {
        Self { defaults }
    }

    #[must_use]
    pub const fn defaults(&self) -> &MarketDefaults {
        &self.defaults
    }

    /// Check a draft and fill its defaults.
    ///
    /// Rules, in order:
    ///
    /// - question and both options must be present and non-blank
    /// - options must differ, ignoring case
    /// - duration, when given, must be at least one day
    /// - fee, when given, must not exceed 10000 basis points
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationFailure`] encountered.
    pub fn validate(&self, draft: MarketDraft) -> Result<ParsedMarketRequest, ValidationFailure> {
        let question = non_blank(draft.question);
        let option_a = non_blank(draft.option_a);
        let option_b = non_blank(draft.option_b);

        let (question, option_a, option_b) = match (question, option_a, option_b) {
            (Some(q), Some(a), Some(b)) => (q, a, b),
            (q, a, b) => {
                let missing = [
                    ("question", q.is_none()),
                    ("optionA", a.is_none()),
                    ("optionB", b.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                return Err(ValidationFailure::MissingFields(missing));
            }
        };

        if option_a.to_lowercase() == option_b.to_lowercase() {
            return Err(ValidationFailure::IdenticalOptions(option_a));
        }

        let days = draft.duration_days.unwrap_or(self.defaults.duration_days);
        let duration_seconds = days
            .checked_mul(SECONDS_PER_DAY)
            .filter(|seconds| *seconds > 0)
            .ok_or(ValidationFailure::InvalidDuration)?;

        let fee_basis_points = draft
            .fee_basis_points
            .unwrap_or(self.defaults.fee_basis_points);
        if fee_basis_points > MAX_FEE_BASIS_POINTS {
            return Err(ValidationFailure::InvalidFee(fee_basis_points));
        }

        let category = non_blank(draft.category).unwrap_or_else(|| self.defaults.category.clone());
        let tags = draft
            .tags
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tag| non_blank(Some(tag)))
            .collect();

        Ok(ParsedMarketRequest::from_validated(
            question,
            option_a,
            option_b,
            duration_seconds,
            category,
            tags,
            fee_basis_points,
        ))
    }

    /// Check a deposit draft.
    ///
    /// The amount is checked before the strategy, so a non-positive amount is
    /// reported even when the strategy is also unknown.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailure::InvalidAmount`] or
    /// [`ValidationFailure::InvalidStrategy`].
    pub fn validate_deposit(&self, draft: DepositDraft) -> Result<DepositIntent, ValidationFailure> {
        let amount = match draft.amount {
            Some(amount) if amount > Decimal::ZERO => amount,
            _ => return Err(ValidationFailure::InvalidAmount),
        };

        let name = draft.strategy.unwrap_or_default();
        let strategy = name
            .parse::<DepositStrategy>()
            .map_err(|unknown| ValidationFailure::InvalidStrategy(unknown.0))?;

        Ok(DepositIntent { strategy, amount })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
