//! End-to-end tests: generated arrivals driving the simulation core

use hwy_core::{sweep_reserved, Simulation, SimulationConfig, WarmUp};
use hwy_gen::{ArrivalDistributions, ArrivalLog, Distribution, RandomArrivals};

fn small_highway() -> (SimulationConfig, ArrivalDistributions) {
    let config = SimulationConfig {
        reserved_channel: 1,
        base_count: 5,
        base_diameter: 100.0,
        base_channel: 4,
        event_count: 400,
        warm_up: WarmUp::Disabled,
        record_history: false,
    };
    let dists = ArrivalDistributions {
        first_arrival: Distribution::Constant { value: 0.0 },
        inter_arrival_time: Distribution::Exponential { mean: 0.5 },
        base_station: Distribution::UniformInt { low: 0, high: 5 },
        call_loc_offset: Distribution::Uniform { low: 0.0, high: 100.0 },
        call_duration: Distribution::Exponential { mean: 20.0 },
        car_velocity: Distribution::Uniform { low: 5.0, high: 15.0 },
        right_probability: 0.5,
    };
    (config, dists)
}

#[test]
fn saved_log_replays_identically() {
    let (config, dists) = small_highway();

    let mut arrivals = RandomArrivals::new(&dists, 2024).unwrap().with_recording();
    let mut sim = Simulation::new(config.clone()).unwrap();
    let (report, trace) = sim.run_traced(&mut arrivals).unwrap();
    let log = arrivals.take_log().unwrap();
    assert_eq!(log.len() as u64, config.event_count);

    let path = std::env::temp_dir()
        .join(format!("hwy-replay-{}", std::process::id()))
        .join("arrivals.json");
    log.save(&path).unwrap();
    let loaded = ArrivalLog::load(&path).unwrap();
    std::fs::remove_dir_all(path.parent().unwrap()).unwrap();

    let mut replay = Simulation::new(config).unwrap();
    let (replay_report, replay_trace) = replay.run_traced(&mut loaded.into_source()).unwrap();

    assert_eq!(replay_report, report);
    assert_eq!(replay_trace, trace);
}

#[test]
fn congested_highway_blocks_and_drops() {
    let (config, dists) = small_highway();
    let mut arrivals = RandomArrivals::new(&dists, 7).unwrap();
    let report = Simulation::new(config).unwrap().run(&mut arrivals).unwrap();

    assert_eq!(report.total, 400);
    assert!(report.blocked > 0);
    assert!(report.handovers > 0);
    assert_eq!(
        report.total,
        report.completed + report.blocked + report.dropped
    );
}

#[test]
fn larger_guard_band_trades_drops_for_blocks() {
    let (config, dists) = small_highway();
    let points = sweep_reserved(&config, 3, |_, run| {
        RandomArrivals::new(&dists, run as u64).unwrap()
    })
    .unwrap();

    assert_eq!(points.len(), 4);
    let first = &points[0];
    let last = &points[3];
    assert!(last.mean_blocked_ratio.unwrap() >= first.mean_blocked_ratio.unwrap());
    assert!(last.mean_dropped_ratio.unwrap() <= first.mean_dropped_ratio.unwrap());
}

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn generated_runs_account_for_every_call(seed: u64) {
            let (config, dists) = small_highway();
            let mut arrivals = RandomArrivals::new(&dists, seed).unwrap();
            let mut sim = Simulation::new(config).unwrap();

            while sim.step(&mut arrivals).unwrap().is_some() {
                for station in 0..5 {
                    prop_assert_eq!(
                        sim.channels().available(station) as usize + sim.calls_holding(station),
                        4
                    );
                }
            }

            let stats = sim.stats();
            prop_assert_eq!(stats.total(), 400);
            prop_assert_eq!(stats.total(), stats.completed() + stats.blocked() + stats.dropped());
        }
    }
}
