use std::path::Path;

use clap::Parser;
use osdeploy::config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli_commands;

#[derive(Parser)]
#[command(name = "osdeploy")]
#[command(
    about = "Bare-metal OS installation and server profile deployment",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: cli_commands::Commands,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let dotenv = config::load_dotenv(Path::new(config::DOTENV_FILE));
    init_logging();
    match dotenv {
        Ok(true) => debug!(path = config::DOTENV_FILE, "loaded environment file"),
        Ok(false) => {}
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
    let cli = Cli::parse();
    if let Err(err) = cli_commands::dispatch(cli.command).await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
