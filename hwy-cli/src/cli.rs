//! Command-line interface definition

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Highway call simulator
#[derive(Parser, Debug)]
#[command(
    name = "highway",
    version,
    about = "Discrete-event simulation of cellular channel allocation along a highway"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file path
    #[arg(short, long, global = true, default_value = "settings.json")]
    pub settings: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the settings file
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one simulation with randomly generated arrivals
    Run(RunArgs),

    /// Repeat the simulation for every reserved-channel count
    Sweep(SweepArgs),

    /// Generate arrivals and save them without simulating
    Generate(GenerateArgs),

    /// Run the simulation on a saved arrival log
    Replay(ReplayArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Random seed (defaults to the settings file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Save the generated arrivals to the input data directory
    #[arg(long)]
    pub save_arrivals: bool,

    /// Write the blocked/dropped ratio history as JSON
    #[arg(long)]
    pub history: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Runs per reserved-channel count (defaults to the settings file)
    #[arg(long)]
    pub runs: Option<usize>,

    /// Base random seed; run `i` uses `seed + i`
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sweep results file (defaults to the result data directory)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of arrivals (defaults to the settings event count)
    #[arg(long)]
    pub count: Option<u64>,

    /// Random seed (defaults to the settings file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file (defaults to the input data directory)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Arrival log to replay
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::parse_from(["highway", "run", "--seed", "7", "--save-arrivals"]);
        assert_eq!(cli.settings, PathBuf::from("settings.json"));
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.seed, Some(7));
                assert!(args.save_arrivals);
                assert!(args.history.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_replay_with_global_flags() {
        let cli = Cli::parse_from([
            "highway",
            "replay",
            "arrivals.json",
            "--settings",
            "custom.json",
            "-l",
            "debug",
        ]);
        assert_eq!(cli.settings, PathBuf::from("custom.json"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Commands::Replay(ReplayArgs { ref path }) if path == &PathBuf::from("arrivals.json")));
    }
}
