//! Handler for the `run` command.

use std::path::Path;

use tracing::info;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::App;

/// Load the configuration and run every enabled surface.
pub async fn execute(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    config.init_logging();

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Config", config_path.display());
    output::field("Contract", &config.chain.contract_address);
    output::field("Surfaces", surfaces(&config).join(", "));
    if output::verbosity() > 0 {
        output::field("RPC", &config.chain.rpc_url);
        output::field("Market id", config.chain.market_id);
    }

    info!("marketcast starting");
    App::run(config).await?;
    info!("marketcast stopped");
    Ok(())
}

/// Names of the surfaces `run` would start.
pub(crate) fn surfaces(config: &Config) -> Vec<&'static str> {
    let mut names = Vec::new();
    if config.twitter.enabled {
        names.push("twitter");
    }
    if config.telegram.enabled {
        names.push("telegram");
    }
    if names.is_empty() {
        names.push("none");
    }
    names
}
