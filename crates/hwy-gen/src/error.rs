//! Error types for arrival generation and persistence

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while generating, saving or loading arrivals
#[derive(Debug, Error)]
pub enum GenError {
    /// Distribution parameters cannot be sampled
    #[error("invalid distribution for {field}: {reason}")]
    InvalidDistribution { field: &'static str, reason: String },

    /// Probability outside [0, 1]
    #[error("invalid probability for {field}: {value}")]
    InvalidProbability { field: &'static str, value: f64 },

    /// Failed to read or write an arrival log
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed arrival log
    #[error("arrival log format error: {0}")]
    Json(#[from] serde_json::Error),
}
