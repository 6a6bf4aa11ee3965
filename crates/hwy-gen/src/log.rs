//! Arrival log persistence
//!
//! A numbered list of arrivals stored as JSON, so a run can be replayed
//! exactly.

use std::path::Path;

use hwy_core::Arrival;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::GenError;

/// One numbered arrival
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrivalEntry {
    /// 1-based arrival number
    pub number: u64,
    #[serde(flatten)]
    pub arrival: Arrival,
}

/// Ordered list of arrivals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArrivalLog {
    entries: Vec<ArrivalEntry>,
}

impl ArrivalLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arrival with the next number
    pub fn push(&mut self, arrival: Arrival) {
        let number = self.entries.len() as u64 + 1;
        self.entries.push(ArrivalEntry { number, arrival });
    }

    /// Number of arrivals
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in order
    pub fn entries(&self) -> &[ArrivalEntry] {
        &self.entries
    }

    /// Arrivals in order
    pub fn arrivals(&self) -> impl Iterator<Item = Arrival> + '_ {
        self.entries.iter().map(|e| e.arrival)
    }

    /// Consume the log as a replayable arrival source
    pub fn into_source(self) -> impl Iterator<Item = Arrival> {
        self.entries.into_iter().map(|e| e.arrival)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, GenError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON
    pub fn from_json(s: &str) -> Result<Self, GenError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Write the log to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), GenError> {
        let io_err = |source| GenError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, self.to_json()?).map_err(io_err)?;
        info!(path = %path.display(), arrivals = self.len(), "Arrival log saved");
        Ok(())
    }

    /// Read a log from `path`
    pub fn load(path: &Path) -> Result<Self, GenError> {
        let s = std::fs::read_to_string(path).map_err(|source| GenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let log = Self::from_json(&s)?;
        info!(path = %path.display(), arrivals = log.len(), "Arrival log loaded");
        Ok(log)
    }
}

impl FromIterator<Arrival> for ArrivalLog {
    fn from_iter<I: IntoIterator<Item = Arrival>>(iter: I) -> Self {
        let mut log = Self::new();
        for arrival in iter {
            log.push(arrival);
        }
        log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwy_core::Direction;

    fn sample_log() -> ArrivalLog {
        [
            (0.0, 1, Direction::Left),
            (1.5, 3, Direction::Right),
        ]
        .into_iter()
        .map(|(time, station, direction)| Arrival {
            time,
            station,
            offset: 12.5,
            duration: 90.0,
            velocity: 30.0,
            direction,
        })
        .collect()
    }

    #[test]
    fn test_numbering_starts_at_one() {
        let log = sample_log();
        let numbers: Vec<u64> = log.entries().iter().map(|e| e.number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_json_layout_is_flat() {
        let json = sample_log().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &value[0];
        assert_eq!(first["number"], 1);
        assert_eq!(first["station"], 1);
        assert_eq!(first["direction"], "left");
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("hwy-gen-log-{}", std::process::id()));
        let path = dir.join("nested").join("arrivals.json");

        let log = sample_log();
        log.save(&path).unwrap();
        let loaded = ArrivalLog::load(&path).unwrap();
        assert_eq!(loaded, log);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_json_preserves_float_bits() {
        let times = [3.168189551289444, 0.1 + 0.2, 1.0 / 3.0, 5e-324, 1.7976931348623157e308];
        let log: ArrivalLog = times
            .iter()
            .map(|&time| Arrival {
                time,
                station: 0,
                offset: time.min(2000.0),
                duration: time,
                velocity: 33.35 + time.min(1.0),
                direction: Direction::Right,
            })
            .collect();

        let loaded = ArrivalLog::from_json(&log.to_json().unwrap()).unwrap();
        for (before, after) in log.arrivals().zip(loaded.arrivals()) {
            assert_eq!(before.time.to_bits(), after.time.to_bits());
            assert_eq!(before.offset.to_bits(), after.offset.to_bits());
            assert_eq!(before.velocity.to_bits(), after.velocity.to_bits());
        }
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("hwy-gen-definitely-missing.json");
        assert!(matches!(ArrivalLog::load(&path), Err(GenError::Io { .. })));
    }

    #[test]
    fn test_into_source_preserves_order() {
        let times: Vec<f64> = sample_log().into_source().map(|a| a.time).collect();
        assert_eq!(times, vec![0.0, 1.5]);
    }
}
