use clap::Parser;
use marketcast::adapter::inbound::cli::{self, command::Cli, output};
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    tokio::select! {
        result = cli::execute(cli) => {
            if let Err(e) = result {
                output::error(&e.to_string());
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }
}
