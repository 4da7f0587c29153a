//! Language-model extraction.
//!
//! The model is asked for a JSON object and its answer is treated as
//! untrusted input: every field is coerced individually and anything that
//! does not fit is dropped.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::Extractor;
use crate::domain::{DepositDraft, DepositStrategy, ExtractionFailure, MarketDraft};
use crate::error::{Error, Result};
use crate::port::outbound::llm::Llm;

/// Extracts market and deposit fields with a language model.
pub struct ModelExtractor {
    llm: Arc<dyn Llm>,
}

impl ModelExtractor {
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self { llm }
    }

    fn market_prompt(text: &str) -> String {
        format!(
            r#"Extract the parameters of a binary prediction market from the message below.

Message:
"""
{text}
"""

Respond with a single JSON object and nothing else:

```json
{{
  "_question": "The yes/no or either/or question, ending with ?",
  "_optionA": "First outcome",
  "_optionB": "Second outcome",
  "_duration": 7,
  "_category": "Short category such as SPORTS, CRYPTO or POLITICS",
  "_tags": ["tag1", "tag2"],
  "_marketFee": 100
}}
```

Rules:
- "_duration" is a whole number of days the market stays open
- "_marketFee" is in basis points (100 = 1%)
- Use null for anything the message does not say
"#
        )
    }

    fn deposit_prompt(text: &str) -> String {
        let names = DepositStrategy::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            r#"Extract a BTC deposit request from the message below.

Message:
"""
{text}
"""

Known strategies: {names}

Respond with a single JSON object and nothing else:

```json
{{
  "strategy": "one of the known strategies",
  "amount": 0.5
}}
```

Use null for anything the message does not say.
"#
        )
    }

    /// Ask the model and return its answer as a JSON object.
    async fn ask(&self, prompt: &str) -> std::result::Result<Map<String, Value>, ExtractionFailure> {
        let response = self.llm.complete(prompt).await.map_err(|e| {
            warn!(provider = self.llm.name(), error = %e, "LLM call failed");
            ExtractionFailure::Model(e.to_string())
        })?;
        debug!(provider = self.llm.name(), "LLM extraction complete");

        parse_object(&response).map_err(|e| ExtractionFailure::Model(e.to_string()))
    }

    /// Extract deposit fields from `text`.
    ///
    /// Missing fields are left as `None` for the validator to reject.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionFailure::Model`] when the model call fails or its
    /// answer holds no JSON object.
    pub async fn extract_deposit(
        &self,
        text: &str,
    ) -> std::result::Result<DepositDraft, ExtractionFailure> {
        let object = self.ask(&Self::deposit_prompt(text)).await?;
        Ok(DepositDraft {
            strategy: string_field(&object, "strategy"),
            amount: decimal_field(&object, "amount"),
        })
    }
}

#[async_trait]
impl Extractor for ModelExtractor {
    fn name(&self) -> &'static str {
        "model"
    }

    async fn extract(&self, text: &str) -> std::result::Result<MarketDraft, ExtractionFailure> {
        let object = self.ask(&Self::market_prompt(text)).await?;

        let draft = MarketDraft {
            question: string_field(&object, "_question"),
            option_a: string_field(&object, "_optionA"),
            option_b: string_field(&object, "_optionB"),
            duration_days: days_field(&object, "_duration"),
            category: string_field(&object, "_category"),
            tags: tags_field(&object, "_tags"),
            fee_basis_points: fee_field(&object, "_marketFee"),
        };

        let missing: Vec<&'static str> = [
            ("question", draft.question.is_none()),
            ("optionA", draft.option_a.is_none()),
            ("optionB", draft.option_b.is_none()),
            ("duration", draft.duration_days.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        if !missing.is_empty() {
            return Err(ExtractionFailure::Incomplete { missing });
        }

        Ok(draft)
    }
}

/// Locate the JSON object in a model answer and parse it.
fn parse_object(response: &str) -> Result<Map<String, Value>> {
    let json_str = extract_json(response)?;
    match serde_json::from_str(json_str) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(Error::Parse("Model answer is not a JSON object".into())),
        Err(e) => Err(Error::Parse(format!("Invalid JSON: {e}"))),
    }
}

fn extract_json(text: &str) -> Result<&str> {
    // Find JSON in markdown code block or raw
    if let Some(start) = text.find("```json") {
        let start = start + 7;
        let end = text[start..]
            .find("```")
            .map_or(text.len(), |i| start + i);
        Ok(text[start..end].trim())
    } else if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if end < start {
            return Err(Error::Parse("No JSON found in response".into()));
        }
        Ok(&text[start..=end])
    } else {
        Err(Error::Parse("No JSON found in response".into()))
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Whole days. Negative values become zero so validation rejects them.
fn days_field(object: &Map<String, Value>, key: &str) -> Option<u64> {
    match object.get(key)? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(float_days)),
        Value::String(s) => {
            let leading = s.split_whitespace().next()?;
            leading.parse::<f64>().ok().map(float_days)
        }
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_days(days: f64) -> u64 {
    if days.is_finite() && days > 0.0 {
        days.trunc() as u64
    } else {
        0
    }
}

/// Basis points. Oversized values saturate so validation rejects them.
fn fee_field(object: &Map<String, Value>, key: &str) -> Option<u32> {
    let raw = match object.get(key)? {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    Some(u32::try_from(raw).unwrap_or(u32::MAX))
}

fn tags_field(object: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    match object.get(key)? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
        ),
        Value::String(s) => Some(
            s.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
        ),
        _ => None,
    }
}

fn decimal_field(object: &Map<String, Value>, key: &str) -> Option<Decimal> {
    match object.get(key)? {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::llm::client::tests::{FailingLlm, MockLlm};
    use rust_decimal_macros::dec;

    fn extractor(response: &str) -> ModelExtractor {
        ModelExtractor::new(Arc::new(MockLlm::new(response)))
    }

    #[tokio::test]
    async fn parses_fenced_json() {
        let response = r#"Sure! Here you go:
```json
{"_question": "Will BTC close above 100k?", "_optionA": "Yes", "_optionB": "No",
 "_duration": 14, "_category": "CRYPTO", "_tags": ["btc", " price "], "_marketFee": 250}
```"#;
        let draft = extractor(response).extract("anything").await.unwrap();
        assert_eq!(draft.question.as_deref(), Some("Will BTC close above 100k?"));
        assert_eq!(draft.duration_days, Some(14));
        assert_eq!(draft.category.as_deref(), Some("CRYPTO"));
        assert_eq!(draft.tags, Some(vec!["btc".to_string(), "price".to_string()]));
        assert_eq!(draft.fee_basis_points, Some(250));
    }

    #[tokio::test]
    async fn coerces_loosely_typed_fields() {
        let response = r#"{"_question": "Q?", "_optionA": 1, "_optionB": "2",
            "_duration": "30 days", "_tags": "a, b", "_marketFee": "50"}"#;
        let draft = extractor(response).extract("x").await.unwrap();
        assert_eq!(draft.option_a.as_deref(), Some("1"));
        assert_eq!(draft.duration_days, Some(30));
        assert_eq!(draft.tags, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(draft.fee_basis_points, Some(50));
    }

    #[tokio::test]
    async fn negative_duration_becomes_zero() {
        let response = r#"{"_question": "Q?", "_optionA": "A", "_optionB": "B", "_duration": -3}"#;
        let draft = extractor(response).extract("x").await.unwrap();
        assert_eq!(draft.duration_days, Some(0));
    }

    #[tokio::test]
    async fn missing_required_fields_are_incomplete() {
        let response = r#"{"_question": "Q?", "_optionA": "A", "_optionB": null}"#;
        let err = extractor(response).extract("x").await.unwrap_err();
        assert_eq!(
            err,
            ExtractionFailure::Incomplete {
                missing: vec!["optionB", "duration"]
            }
        );
    }

    #[tokio::test]
    async fn blank_strings_count_as_missing() {
        let response = r#"{"_question": "  ", "_optionA": "A", "_optionB": "B", "_duration": 1}"#;
        let err = extractor(response).extract("x").await.unwrap_err();
        assert_eq!(
            err,
            ExtractionFailure::Incomplete {
                missing: vec!["question"]
            }
        );
    }

    #[tokio::test]
    async fn non_json_answer_is_model_failure() {
        let err = extractor("no idea").extract("x").await.unwrap_err();
        assert!(matches!(err, ExtractionFailure::Model(_)));
    }

    #[tokio::test]
    async fn json_array_is_model_failure() {
        let err = extractor("```json\n[1, 2]\n```").extract("x").await.unwrap_err();
        assert!(matches!(err, ExtractionFailure::Model(_)));
    }

    #[tokio::test]
    async fn provider_error_is_model_failure() {
        let extractor = ModelExtractor::new(Arc::new(FailingLlm));
        let err = extractor.extract("x").await.unwrap_err();
        assert!(matches!(err, ExtractionFailure::Model(_)));
    }

    #[tokio::test]
    async fn extracts_deposit_fields() {
        let draft = extractor(r#"{"strategy": "Solv", "amount": 0.25}"#)
            .extract_deposit("put a quarter btc in solv")
            .await
            .unwrap();
        assert_eq!(draft.strategy.as_deref(), Some("Solv"));
        assert_eq!(draft.amount, Some(dec!(0.25)));
    }

    #[tokio::test]
    async fn deposit_amount_may_be_missing() {
        let draft = extractor(r#"{"strategy": "pell"}"#)
            .extract_deposit("deposit into pell")
            .await
            .unwrap();
        assert_eq!(draft.amount, None);
    }

    #[test]
    fn prompt_names_every_field() {
        let prompt = ModelExtractor::market_prompt("hello");
        for key in [
            "_question",
            "_optionA",
            "_optionB",
            "_duration",
            "_category",
            "_tags",
            "_marketFee",
        ] {
            assert!(prompt.contains(key), "prompt lacks {key}");
        }
        assert!(prompt.contains("hello"));
    }

    #[test]
    fn extract_json_finds_raw_object() {
        assert_eq!(extract_json("prefix {\"a\": 1} suffix").unwrap(), "{\"a\": 1}");
        assert!(extract_json("} backwards {").is_err());
    }
}
