//! Zoning Wizard - session state for a multi-step zoning-compliance questionnaire
//!
//! Each invocation restores the questionnaire session for the active session
//! scope, applies one command and mirrors the result back to session storage.

mod app;
mod cli;
mod commands;
mod config;
mod output;
mod state;
mod storage;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::WizardConfig;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = WizardConfig::load()?;

    init_tracing(&cli, config.log_filter.as_deref());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::dispatch(cli, config, &mut out)
}

fn init_tracing(cli: &Cli, configured: Option<&str>) {
    let default_filter = if cli.quiet {
        "zoning_wizard=warn"
    } else if cli.verbose {
        "zoning_wizard=debug"
    } else {
        configured.unwrap_or("zoning_wizard=info")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
