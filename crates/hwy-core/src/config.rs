//! Simulation configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// When statistics start being counted
///
/// Serialized as `null` (disabled) or a number (simulation time).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum WarmUp {
    /// Count from the first dispatched event
    #[default]
    Disabled,
    /// Count from the first event dispatched at or after this time
    Until(f64),
}

impl WarmUp {
    /// Threshold time, if any
    pub fn threshold(&self) -> Option<f64> {
        match self {
            Self::Disabled => None,
            Self::Until(t) => Some(*t),
        }
    }
}

impl From<Option<f64>> for WarmUp {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Disabled, Self::Until)
    }
}

impl From<WarmUp> for Option<f64> {
    fn from(value: WarmUp) -> Self {
        value.threshold()
    }
}

/// Fixed parameters of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Channels per station withheld from new calls (handover guard band)
    pub reserved_channel: u32,
    /// Number of stations along the highway
    pub base_count: usize,
    /// Distance covered by one station
    pub base_diameter: f64,
    /// Total channels per station
    pub base_channel: u32,
    /// Number of arrivals drawn from the arrival source over the run
    pub event_count: u64,
    /// Warm-up period excluded from the statistics
    #[serde(default)]
    pub warm_up: WarmUp,
    /// Record a ratio sample at every statistics update
    #[serde(default)]
    pub record_history: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            reserved_channel: 0,
            base_count: 20,
            base_diameter: 2000.0,
            base_channel: 10,
            event_count: 10_000,
            warm_up: WarmUp::Disabled,
            record_history: false,
        }
    }
}

impl SimulationConfig {
    /// Check every parameter, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_count == 0 {
            return Err(ConfigError::NoStations);
        }
        if self.base_channel == 0 {
            return Err(ConfigError::NoChannels);
        }
        if !self.base_diameter.is_finite() || self.base_diameter <= 0.0 {
            return Err(ConfigError::InvalidDiameter(self.base_diameter));
        }
        if self.reserved_channel >= self.base_channel {
            return Err(ConfigError::ReservedExceedsCapacity {
                reserved: self.reserved_channel,
                channels: self.base_channel,
            });
        }
        if let WarmUp::Until(t) = self.warm_up {
            if !t.is_finite() || t < 0.0 {
                return Err(ConfigError::InvalidWarmUp(t));
            }
        }
        Ok(())
    }

    /// Same configuration with a different guard band
    pub fn with_reserved(&self, reserved_channel: u32) -> Self {
        Self {
            reserved_channel,
            ..self.clone()
        }
    }
}
