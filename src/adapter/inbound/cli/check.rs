//! Handler for `check config`.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::adapter::inbound::cli::run::surfaces;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Validate the configuration file without starting any surface.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = Config::load(path)?;

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Chain");
    output::field("RPC", &config.chain.rpc_url);
    output::field("Contract", &config.chain.contract_address);
    match config.chain.chain_id {
        Some(id) => output::field("Chain ID", id),
        None => output::field("Chain ID", "from node"),
    }
    output::field("Timeout", format!("{}s", config.chain.confirmation_timeout_secs));
    output::field("Market id", config.chain.market_id);

    output::section("Markets");
    output::field("Duration", format!("{} days", config.market.duration_days));
    output::field("Category", &config.market.category);
    output::field("Fee", format!("{} bps", config.market.fee_basis_points));

    output::section("Surfaces");
    output::field("Enabled", surfaces(&config).join(", "));
    if config.twitter.enabled {
        output::field("Account", format!("@{}", config.agent.handle()));
    }
    if !config.twitter.enabled && !config.telegram.enabled {
        output::warning("No surface enabled; `run` will refuse to start");
        output::hint("set enabled = true under [twitter] or [telegram]");
    }
    if config.llm.enabled {
        output::field("LLM", format!("{} ({})", config.llm.provider, config.llm.model()));
    } else {
        output::field("LLM", "disabled");
    }
    match config.frontend_url() {
        Some(url) => output::field("Frontend", url),
        None => output::warning("No frontend_url; success replies will omit a market link"),
    }

    output::success("Configuration check complete");
    Ok(())
}
