use bot_provision::{cli::Cli, config, run_command};
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> bot_provision::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    // Load configuration
    let config = config::load_config(cli.config.as_deref())?;
    log::debug!("Management API: {}", config.api.url);

    // Execute command
    run_command(cli.command, &config, cli.json).await
}
