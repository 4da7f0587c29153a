//! Handler for the `parse` command.

use std::path::Path;

use serde::Deserialize;
use serde_json::json;

use crate::adapter::inbound::cli::command::ParseArgs;
use crate::adapter::inbound::cli::output;
use crate::application::extract::grammar::GrammarExtractor;
use crate::application::validate::{MarketDefaults, Validator};
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::config::market::MarketConfig;

/// Only the `[market]` table; `parse` needs no chain credentials.
#[derive(Debug, Default, Deserialize)]
struct MarketSection {
    #[serde(default)]
    market: MarketConfig,
}

#[allow(clippy::result_large_err)]
fn load_defaults(path: Option<&Path>) -> Result<MarketDefaults> {
    let Some(path) = path else {
        return Ok(MarketDefaults::default());
    };
    let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
    let section: MarketSection = toml::from_str(&content).map_err(ConfigError::Parse)?;
    section.market.validate()?;
    Ok(section.market.defaults())
}

/// Extract and validate `args.text` without submitting anything.
///
/// # Errors
///
/// Returns the extraction or validation failure after printing its
/// remediation text.
pub fn execute(args: &ParseArgs) -> Result<()> {
    let defaults = load_defaults(args.config.as_deref())?;
    let validator = Validator::new(defaults);

    let matched = match GrammarExtractor::new().parse(&args.text) {
        Ok(matched) => matched,
        Err(failure) => {
            output::error(&failure.remediation());
            return Err(Error::Extraction(failure));
        }
    };

    let request = match validator.validate(matched.draft) {
        Ok(request) => request,
        Err(failure) => {
            output::error(&failure.remediation());
            return Err(Error::Validation(failure));
        }
    };

    output::success(&format!("Matched {:?} pattern", matched.pattern));
    output::json_block(&json!({
        "pattern": format!("{:?}", matched.pattern).to_lowercase(),
        "request": request,
        "duration_seconds": request.duration_seconds(),
    }));
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_without_config_file() {
        assert_eq!(load_defaults(None).unwrap(), MarketDefaults::default());
    }

    #[test]
    fn reads_market_section_only() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[market]\ncategory = \"WEATHER\"\nduration_days = 3").unwrap();
        let defaults = load_defaults(Some(file.path())).unwrap();
        assert_eq!(defaults.category, "WEATHER");
        assert_eq!(defaults.duration_days, 3);
    }

    #[test]
    fn invalid_market_section_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[market]\nduration_days = 0").unwrap();
        assert!(load_defaults(Some(file.path())).is_err());
    }

    #[test]
    fn unmatched_text_returns_extraction_error() {
        let args = ParseArgs {
            text: "hello there".into(),
            config: None,
        };
        assert!(matches!(execute(&args), Err(Error::Extraction(_))));
    }
}
