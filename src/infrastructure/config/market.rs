//! Market request defaults.

use serde::Deserialize;

use crate::application::validate::MarketDefaults;
use crate::domain::market::{
    DEFAULT_CATEGORY, DEFAULT_DURATION_DAYS, DEFAULT_FEE_BASIS_POINTS, MAX_FEE_BASIS_POINTS,
};
use crate::error::{ConfigError, Result};

/// `[market]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    /// Duration when the command names none.
    #[serde(default = "default_duration_days")]
    pub duration_days: u64,
    /// Category when the command names none.
    #[serde(default = "default_category")]
    pub category: String,
    /// Fee when the command names none, in basis points.
    #[serde(default = "default_fee_basis_points")]
    pub fee_basis_points: u32,
}

const fn default_duration_days() -> u64 {
    DEFAULT_DURATION_DAYS
}

fn default_category() -> String {
    DEFAULT_CATEGORY.into()
}

const fn default_fee_basis_points() -> u32 {
    DEFAULT_FEE_BASIS_POINTS
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            duration_days: default_duration_days(),
            category: default_category(),
            fee_basis_points: default_fee_basis_points(),
        }
    }
}

impl MarketConfig {
    #[allow(clippy::result_large_err)]
    pub(crate) fn validate(&self) -> Result<()> {
        if self.duration_days == 0 {
            return Err(ConfigError::InvalidValue {
                field: "duration_days",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if self.fee_basis_points > MAX_FEE_BASIS_POINTS {
            return Err(ConfigError::InvalidValue {
                field: "fee_basis_points",
                reason: format!("must not exceed {MAX_FEE_BASIS_POINTS}"),
            }
            .into());
        }
        if self.category.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "category",
                reason: "must not be blank".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Validator defaults described by this section.
    #[must_use]
    pub fn defaults(&self) -> MarketDefaults {
        MarketDefaults {
            duration_days: self.duration_days,
            category: self.category.trim().to_string(),
            fee_basis_points: self.fee_basis_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_validator_defaults() {
        assert_eq!(MarketConfig::default().defaults(), MarketDefaults::default());
    }

    #[test]
    fn rejects_zero_duration() {
        let config = MarketConfig {
            duration_days: 0,
            ..MarketConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_excessive_fee() {
        let config = MarketConfig {
            fee_basis_points: 20_000,
            ..MarketConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
