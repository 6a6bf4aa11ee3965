//! Command implementations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hwy_core::{sweep_reserved, Simulation, SimulationReport, SweepPoint};
use hwy_gen::{ArrivalLog, RandomArrivals};
use serde::Serialize;
use tracing::info;

use crate::cli::{GenerateArgs, ReplayArgs, RunArgs, SweepArgs};
use crate::settings::Settings;

/// Run one simulation on generated arrivals
pub fn run(settings: &Settings, args: RunArgs) -> Result<()> {
    let mut config = settings.simulation_config();
    config.record_history = args.history.is_some();
    let seed = args.seed.unwrap_or(settings.simulator.seed);

    let mut arrivals = RandomArrivals::new(&settings.simulator.distribution, seed)
        .context("Invalid arrival distributions")?;
    if args.save_arrivals {
        arrivals = arrivals.with_recording();
    }

    let mut sim = Simulation::new(config).context("Invalid simulation settings")?;
    let report = sim.run(&mut arrivals).context("Simulation failed")?;
    print_report(&report);

    if let Some(log) = arrivals.take_log() {
        let path = arrival_log_path(&settings.data.input_dir, seed);
        log.save(&path).context("Failed to save arrivals")?;
        println!("Arrivals saved to {}", path.display());
    }

    if let Some(path) = args.history {
        write_json(&path, &report.history)?;
        println!("Ratio history saved to {}", path.display());
    }

    Ok(())
}

/// Sweep every reserved-channel count
pub fn sweep(settings: &Settings, args: SweepArgs) -> Result<()> {
    let config = settings.simulation_config();
    let runs = args.runs.unwrap_or(settings.simulator.simulation_count);
    let seed = args.seed.unwrap_or(settings.simulator.seed);
    let dists = &settings.simulator.distribution;

    let template = RandomArrivals::new(dists, seed).context("Invalid arrival distributions")?;
    info!(runs, seed, "Starting reserved-channel sweep");

    // Run `i` sees the same arrivals for every reserved-channel count
    let points = sweep_reserved(&config, runs, |_, run| {
        template.reseeded(seed.wrapping_add(run as u64))
    })
    .context("Sweep failed")?;

    print!("{}", format_sweep_table(&points));

    let path = args.out.unwrap_or_else(|| {
        settings
            .data
            .result_dir
            .join(format!("sweep_seed{}.json", seed))
    });
    write_json(&path, &points)?;
    println!("Sweep results saved to {}", path.display());
    Ok(())
}

/// Generate arrivals and save them
pub fn generate(settings: &Settings, args: GenerateArgs) -> Result<()> {
    let count = args.count.unwrap_or(settings.simulator.event);
    let seed = args.seed.unwrap_or(settings.simulator.seed);

    let arrivals = RandomArrivals::new(&settings.simulator.distribution, seed)
        .context("Invalid arrival distributions")?;
    let log: ArrivalLog = arrivals.take(count as usize).collect();

    let path = args
        .out
        .unwrap_or_else(|| arrival_log_path(&settings.data.input_dir, seed));
    log.save(&path).context("Failed to save arrivals")?;
    println!("{} arrivals saved to {}", log.len(), path.display());
    Ok(())
}

/// Re-run a saved arrival log
pub fn replay(settings: &Settings, args: ReplayArgs) -> Result<()> {
    let log = ArrivalLog::load(&args.path).context("Failed to load arrivals")?;

    let mut config = settings.simulation_config();
    config.event_count = log.len() as u64;

    let mut sim = Simulation::new(config).context("Invalid simulation settings")?;
    let report = sim
        .run(&mut log.into_source())
        .context("Simulation failed")?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &SimulationReport) {
    println!("{}", report.blocked_display());
    println!("{}", report.dropped_display());
}

fn arrival_log_path(dir: &Path, seed: u64) -> PathBuf {
    dir.join(format!("arrival_event_seed{}.json", seed))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value).context("Failed to serialize results")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Render sweep results as a fixed-width table
pub fn format_sweep_table(points: &[SweepPoint]) -> String {
    let pct = |ratio: Option<f64>| match ratio {
        Some(r) => format!("{:.3}", r * 100.0),
        None => "---".to_string(),
    };

    let mut out = format!("{:>8}  {:>11}  {:>11}\n", "Reserved", "Blocked (%)", "Dropped (%)");
    for point in points {
        out.push_str(&format!(
            "{:>8}  {:>11}  {:>11}\n",
            point.reserved_channel,
            pct(point.mean_blocked_ratio),
            pct(point.mean_dropped_ratio)
        ));
    }
    out
}
