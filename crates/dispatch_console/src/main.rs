use std::io;

use anyhow::Result;
use clap::Parser;
use dispatch_console::cli::Cli;
use dispatch_console::console::Console;
use dispatch_console::render::OutputFormat;
use dispatch_core::DispatchService;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = cli.dispatch_config();
    tracing::info!(?config, "starting dispatch console");

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let mut console = Console::new(DispatchService::new(config), stdin, stdout, format);
    console.run()?;

    let stats = console.service().stats();
    tracing::info!(
        dispatched = stats.dispatched,
        completed = stats.completed,
        "dispatch console exiting"
    );
    Ok(())
}
