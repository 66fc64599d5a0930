//! climate - serve the Hawaii weather-station JSON API or build its store.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "climate",
    version,
    about = "Read-only JSON API over Hawaii weather-station measurements"
)]
struct Cli {
    #[command(subcommand)]
    command: climate_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    log::debug!("running {:?}", cli.command);
    climate_cmd::run(cli.command).await
}
