//! Settings file

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hwy_core::{SimulationConfig, WarmUp};
use hwy_gen::ArrivalDistributions;
use serde::{Deserialize, Serialize};

/// Highway layout and guard band
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariableSettings {
    /// Channels per station reserved for handovers
    pub reserved_channel: u32,
    /// Number of stations
    pub base_count: usize,
    /// Coverage length of each station (meters)
    pub base_diameter: f64,
    /// Channels per station
    pub base_channel: u32,
}

impl Default for VariableSettings {
    fn default() -> Self {
        Self {
            reserved_channel: 0,
            base_count: 20,
            base_diameter: 2000.0,
            base_channel: 10,
        }
    }
}

/// Simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulatorSettings {
    #[serde(default)]
    pub variable: VariableSettings,
    /// Arrivals per run
    #[serde(default = "default_event")]
    pub event: u64,
    /// Statistics start at this time; `null` counts from the start
    #[serde(default)]
    pub warm_up_threshold: Option<f64>,
    /// Runs per reserved-channel count in a sweep
    #[serde(default = "default_simulation_count")]
    pub simulation_count: usize,
    /// Random seed
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub distribution: ArrivalDistributions,
}

fn default_event() -> u64 {
    10_000
}

fn default_simulation_count() -> usize {
    10
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            variable: VariableSettings::default(),
            event: default_event(),
            warm_up_threshold: None,
            simulation_count: default_simulation_count(),
            seed: 0,
            distribution: ArrivalDistributions::default(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogSettings {
    /// Default level when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Output locations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataSettings {
    /// Directory for saved arrival logs
    pub input_dir: PathBuf,
    /// Directory for results (ratio history, sweep tables)
    pub result_dir: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data/input"),
            result_dir: PathBuf::from("data/result"),
        }
    }
}

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub simulator: SimulatorSettings,
    #[serde(default)]
    pub log: LogSettings,
    #[serde(default)]
    pub data: DataSettings,
}

impl Settings {
    /// Load settings from `path`, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        serde_json::from_str(&s)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }

    /// Simulation configuration described by these settings
    pub fn simulation_config(&self) -> SimulationConfig {
        let v = &self.simulator.variable;
        SimulationConfig {
            reserved_channel: v.reserved_channel,
            base_count: v.base_count,
            base_diameter: v.base_diameter,
            base_channel: v.base_channel,
            event_count: self.simulator.event,
            warm_up: WarmUp::from(self.simulator.warm_up_threshold),
            record_history: false,
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn settings_survive_json(
            seed: u64,
            threshold in prop::option::of(0.0f64..1e6),
            reserved in 0u32..10,
            base_count in 1usize..100,
            base_diameter in 1.0f64..1e5,
        ) {
            let mut settings = Settings::default();
            settings.simulator.seed = seed;
            settings.simulator.warm_up_threshold = threshold;
            settings.simulator.variable = VariableSettings {
                reserved_channel: reserved,
                base_count,
                base_diameter,
                base_channel: 10,
            };

            let json = serde_json::to_string(&settings).unwrap();
            let parsed: Settings = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(&parsed, &settings);

            let config = parsed.simulation_config();
            prop_assert!(config.validate().is_ok());
            prop_assert_eq!(config.warm_up.threshold(), threshold);
        }
    }
}
