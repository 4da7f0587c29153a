//! Deposit strategy vocabulary.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

/// Yield strategies a user may ask to deposit into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositStrategy {
    Segment,
    Solv,
    Avalon,
    Bedrock,
    Pell,
    Ionic,
}

impl DepositStrategy {
    /// Every supported strategy, in display order.
    pub const ALL: [Self; 6] = [
        Self::Segment,
        Self::Solv,
        Self::Avalon,
        Self::Bedrock,
        Self::Pell,
        Self::Ionic,
    ];

    /// Lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Segment => "segment",
            Self::Solv => "solv",
            Self::Avalon => "avalon",
            Self::Bedrock => "bedrock",
            Self::Pell => "pell",
            Self::Ionic => "ionic",
        }
    }

    /// One-paragraph description shown before the user confirms a deposit.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Segment => "The Segment strategy earns yield by providing liquidity to Segment Finance. Your BTC is used to mint seBTC tokens.",
            Self::Solv => "The Solv strategy uses Solv Protocol to convert your BTC into liquid staking tokens for additional yield.",
            Self::Avalon => "The Avalon strategy gives exposure to Avalon's yield generation through its specialized vaults.",
            Self::Bedrock => "The Bedrock strategy uses Bedrock Finance's yield optimization to generate returns on your BTC.",
            Self::Pell => "The Pell strategy uses Pell's yield farming strategies to maximize returns on your BTC.",
            Self::Ionic => "The Ionic strategy uses Ionic Protocol's lending and borrowing markets to generate yield on your BTC.",
        }
    }
}

impl fmt::Display for DepositStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a name matches no [`DepositStrategy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl FromStr for DepositStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownStrategy(needle.to_string()))
    }
}

/// Unvalidated deposit fields as extracted from a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepositDraft {
    pub strategy: Option<String>,
    pub amount: Option<Decimal>,
}

/// A validated request to deposit into a strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositIntent {
    pub strategy: DepositStrategy,
    pub amount: Decimal,
}
