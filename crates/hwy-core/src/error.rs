//! Error types for the simulation core

use thiserror::Error;

/// Reasons a [`SimulationConfig`](crate::SimulationConfig) is rejected
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// The highway needs at least one station
    #[error("base_count must be at least 1")]
    NoStations,

    /// Every station needs at least one channel
    #[error("base_channel must be at least 1")]
    NoChannels,

    /// Station spacing must be a positive, finite distance
    #[error("base_diameter must be positive and finite, got {0}")]
    InvalidDiameter(f64),

    /// The guard band would swallow every channel
    #[error("reserved_channel ({reserved}) must be less than base_channel ({channels})")]
    ReservedExceedsCapacity { reserved: u32, channels: u32 },

    /// Warm-up threshold must be a non-negative, finite time
    #[error("warm-up threshold must be non-negative and finite, got {0}")]
    InvalidWarmUp(f64),
}

/// Errors that can occur while running a simulation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A call moving at zero, negative or non-finite speed
    #[error("invalid velocity: {velocity} (must be positive and finite)")]
    InvalidVelocity { velocity: f64 },

    /// Malformed arrival record from the arrival source
    #[error("invalid arrival: {reason}")]
    InvalidArrival { reason: String },

    /// Ratio requested before any call was counted
    #[error("no calls counted, ratio is undefined")]
    EmptyStatistics,

    /// A handover with no station behind it to vacate
    #[error("handover into station {station} has no previous station")]
    OrphanHandover { station: usize },

    /// A station was released more times than it was acquired
    #[error("channel release on station {station} exceeds its capacity")]
    ChannelOverflow { station: usize },
}

/// Convenience alias for core results
pub type Result<T> = std::result::Result<T, SimError>;
