#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod app;
mod cli;

use cli::commands::Cli;
use r2g2::Config;
use r2g2::shutdown::cancel_on_signals;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries command output only.
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let config = Config::load(cli.config.as_deref()).context("Failed to load config")?;

    let cancel = CancellationToken::new();
    let signals = cancel_on_signals(cancel.clone());

    let result = app::dispatch::dispatch(cli.command, config, cancel.clone()).await;

    cancel.cancel();
    let _ = signals.await;
    result
}
