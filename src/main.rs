// ABOUTME: CLI entrypoint for the notion-sync command
// ABOUTME: Sets up tracing, builds config, and maps errors to exit codes

use clap::Parser;
use notion_sync::{
    api::ApiClient, cli::Cli, config::Config, storage::DocumentWriter, sync::sync_all, Result,
};
use tracing_subscriber::EnvFilter;

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        tracing::error!(error = %e, "Sync exited with error");
        eprintln!("notion-sync: [E{}] {}", e.exit_code(), e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    let config = Config::from_cli(Cli::parse())?;
    config.trace_loaded();

    let mut client = ApiClient::new(
        config.token.clone(),
        config.database_id.clone(),
        Some(config.api_base.clone()),
    )?;
    if let Some((min, max)) = config.throttle_ms {
        client = client.with_throttle(min, max);
    }

    let writer = DocumentWriter::new(config.output_dir.clone());
    sync_all(&client, &writer, &config.filter, config.options)?;

    Ok(())
}
