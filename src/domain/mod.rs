//! Exchange-agnostic value types for the market creation pipeline.
//!
//! - [`command`] - Inbound command envelope and origin channels
//! - [`market`] - Drafts, validated requests and submission results
//! - [`deposit`] - Deposit strategies and intents
//! - [`error`] - Extraction and validation failures

pub mod command;
pub mod deposit;
pub mod error;
pub mod market;

pub use command::{OriginChannel, RawCommand};
pub use deposit::{DepositDraft, DepositIntent, DepositStrategy};
pub use error::{ExtractionFailure, ValidationFailure};
pub use market::{MarketDraft, MarketIdSource, ParsedMarketRequest, SubmissionResult};
