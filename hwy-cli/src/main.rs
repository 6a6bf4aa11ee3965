//! Highway Call Simulator
//!
//! Command-line driver: loads the settings file, sets up logging, and runs
//! simulations, reserved-channel sweeps, arrival generation or replays.

mod cli;
mod commands;
mod settings;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use settings::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli.settings)?;

    // RUST_LOG wins, then --log-level, then the settings file
    let level = cli.log_level.as_deref().unwrap_or(&settings.log.level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("highway={level},hwy_core={level},hwy_gen={level}")
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(settings = %cli.settings.display(), "Starting highway call simulator");
    if !cli.settings.exists() {
        tracing::warn!("Settings file not found, using defaults");
    }

    match cli.command {
        Commands::Run(args) => commands::run(&settings, args),
        Commands::Sweep(args) => commands::sweep(&settings, args),
        Commands::Generate(args) => commands::generate(&settings, args),
        Commands::Replay(args) => commands::replay(&settings, args),
    }
}
