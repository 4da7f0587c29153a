//! CLI module graph.

pub mod chat;
pub mod check;
pub mod command;
pub mod output;
pub mod parse;
pub mod run;

use command::{CheckCommand, Cli, ColorChoice, Commands};

use crate::error::Result;

/// Apply global flags and run the selected subcommand.
///
/// # Errors
///
/// Returns the subcommand's error.
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => owo_colors::unset_override(),
    }
    output::configure(output::OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    match cli.command {
        Commands::Run(arg) => run::execute(&arg.config).await,
        Commands::Check(CheckCommand::Config(arg)) => check::execute_config(&arg.config),
        Commands::Parse(args) => parse::execute(&args),
        Commands::Chat(args) => chat::execute(&args).await,
    }
}
