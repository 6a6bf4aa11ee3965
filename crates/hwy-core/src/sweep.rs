//! Reserved-channel sweep
//!
//! Repeats the simulation for every guard-band size from `0` to
//! `base_channel - 1` and averages the blocked and dropped ratios, showing the
//! trade-off between blocking new calls and dropping active ones.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::arrival::ArrivalSource;
use crate::config::SimulationConfig;
use crate::engine::{Simulation, SimulationReport};
use crate::error::Result;

/// Averaged results for one guard-band size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Guard-band size
    pub reserved_channel: u32,
    /// Runs performed
    pub runs: usize,
    /// Runs that counted at least one call
    pub counted_runs: usize,
    /// Mean blocked ratio over counted runs
    pub mean_blocked_ratio: Option<f64>,
    /// Mean dropped ratio over counted runs
    pub mean_dropped_ratio: Option<f64>,
}

impl SweepPoint {
    fn from_reports(reserved_channel: u32, reports: &[SimulationReport]) -> Self {
        let counted: Vec<&SimulationReport> = reports.iter().filter(|r| r.total > 0).collect();
        let mean = |f: fn(&SimulationReport) -> Option<f64>| {
            if counted.is_empty() {
                return None;
            }
            let sum: f64 = counted.iter().filter_map(|r| f(r)).sum();
            Some(sum / counted.len() as f64)
        };

        Self {
            reserved_channel,
            runs: reports.len(),
            counted_runs: counted.len(),
            mean_blocked_ratio: mean(|r| r.blocked_ratio),
            mean_dropped_ratio: mean(|r| r.dropped_ratio),
        }
    }
}

/// Sweep every guard-band size, `simulation_count` runs each
///
/// `make_source(reserved_channel, run_index)` supplies a fresh arrival stream
/// per run.
pub fn sweep_reserved<S, F>(
    config: &SimulationConfig,
    simulation_count: usize,
    mut make_source: F,
) -> Result<Vec<SweepPoint>>
where
    S: ArrivalSource,
    F: FnMut(u32, usize) -> S,
{
    let mut points = Vec::with_capacity(config.base_channel as usize);

    for reserved in 0..config.base_channel {
        let run_config = config.with_reserved(reserved);
        let mut reports = Vec::with_capacity(simulation_count);

        for run in 0..simulation_count {
            let mut source = make_source(reserved, run);
            let mut sim = Simulation::new(run_config.clone())?;
            reports.push(sim.run(&mut source)?);
        }

        let point = SweepPoint::from_reports(reserved, &reports);
        info!(
            reserved,
            blocked = ?point.mean_blocked_ratio,
            dropped = ?point.mean_dropped_ratio,
            "Sweep point complete"
        );
        points.push(point);
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrival::{Arrival, Direction};

    fn burst(count: usize) -> impl Iterator<Item = Arrival> {
        (0..count).map(|_| Arrival {
            time: 0.0,
            station: 0,
            offset: 0.0,
            duration: 1.0,
            velocity: 1.0,
            direction: Direction::Right,
        })
    }

    #[test]
    fn test_sweep_covers_every_guard_band() {
        let config = SimulationConfig {
            reserved_channel: 0,
            base_count: 1,
            base_diameter: 100.0,
            base_channel: 3,
            event_count: 4,
            ..Default::default()
        };
        let points = sweep_reserved(&config, 2, |_, _| burst(4)).unwrap();
        assert_eq!(points.len(), 3);

        // Four simultaneous calls against 3, 2 and 1 usable channels
        let blocked: Vec<f64> = points
            .iter()
            .map(|p| p.mean_blocked_ratio.unwrap())
            .collect();
        assert_eq!(blocked, vec![0.25, 0.5, 0.75]);
        assert!(points.iter().all(|p| p.runs == 2 && p.counted_runs == 2));
        assert!(points.iter().all(|p| p.mean_dropped_ratio == Some(0.0)));
    }

    #[test]
    fn test_sweep_with_no_calls() {
        let config = SimulationConfig {
            base_channel: 2,
            ..Default::default()
        };
        let points = sweep_reserved(&config, 1, |_, _| burst(0)).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].counted_runs, 0);
        assert_eq!(points[0].mean_blocked_ratio, None);
    }
}
