//! Market draft extraction.
//!
//! Two strategies are available behind the [`Extractor`] trait:
//!
//! - [`GrammarExtractor`] matches the structural `create market:` grammar.
//! - [`ModelExtractor`] asks a language model for the fields as JSON.
//!
//! [`FallbackExtractor`] chains them: the first strategy runs, and only a
//! [`NoMatch`](ExtractionFailure::NoMatch) hands the text to the second.
//! Deposit commands are parsed separately by [`parse_deposit`].

pub mod deposit;
pub mod grammar;
pub mod model;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{ExtractionFailure, MarketDraft};

pub use deposit::parse_deposit;
pub use grammar::{GrammarExtractor, GrammarMatch, GrammarPattern};
pub use model::ModelExtractor;

/// Turns raw command text into a [`MarketDraft`].
///
/// Extractors never fill defaults or judge field values; that is the
/// validator's job.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Strategy name for logging.
    fn name(&self) -> &'static str;

    /// Extract a draft from `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionFailure`] when the text yields no usable draft.
    async fn extract(&self, text: &str) -> Result<MarketDraft, ExtractionFailure>;
}

/// Runs `primary`, falling back to `secondary` when `primary` finds no match.
pub struct FallbackExtractor {
    primary: Arc<dyn Extractor>,
    secondary: Arc<dyn Extractor>,
}

impl FallbackExtractor {
    #[must_use]
    pub fn new(primary: Arc<dyn Extractor>, secondary: Arc<dyn Extractor>) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl Extractor for FallbackExtractor {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn extract(&self, text: &str) -> Result<MarketDraft, ExtractionFailure> {
        match self.primary.extract(text).await {
            Err(ExtractionFailure::NoMatch) => {
                debug!(
                    primary = self.primary.name(),
                    secondary = self.secondary.name(),
                    "No match, trying next extractor"
                );
                self.secondary.extract(text).await
            }
            other => other,
        }
    }
}
