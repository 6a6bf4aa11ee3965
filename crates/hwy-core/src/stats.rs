//! Call statistics with warm-up gating

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::WarmUp;
use crate::error::{Result, SimError};

/// Cumulative ratios at one statistics update, for external plotting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioSample {
    /// Simulation time of the update
    pub time: f64,
    /// Calls counted so far
    pub total: u64,
    /// Blocked calls so far
    pub blocked: u64,
    /// Dropped calls so far
    pub dropped: u64,
    /// `blocked / total`
    pub blocked_ratio: f64,
    /// `dropped / total`
    pub dropped_ratio: f64,
}

/// Counters for one simulation run
#[derive(Debug, Clone)]
pub struct Statistics {
    warm_up: WarmUp,
    counting: bool,
    total: u64,
    blocked: u64,
    dropped: u64,
    completed: u64,
    handovers: u64,
    history: Option<Vec<RatioSample>>,
}

impl Statistics {
    /// Create empty statistics
    ///
    /// Counting starts immediately unless a warm-up threshold is set.
    pub fn new(warm_up: WarmUp, record_history: bool) -> Self {
        Self {
            warm_up,
            counting: warm_up == WarmUp::Disabled,
            total: 0,
            blocked: 0,
            dropped: 0,
            completed: 0,
            handovers: 0,
            history: record_history.then(Vec::new),
        }
    }

    /// Enable counting once the clock has reached the warm-up threshold
    ///
    /// Once enabled, counting stays on for the rest of the run.
    pub fn observe_clock(&mut self, now: f64) {
        if self.counting {
            return;
        }
        if let WarmUp::Until(threshold) = self.warm_up {
            if now >= threshold {
                info!(time = now, threshold, "Warm-up complete, statistics enabled");
                self.counting = true;
            }
        }
    }

    /// Whether counters are currently updated
    pub fn is_counting(&self) -> bool {
        self.counting
    }

    /// Count a new call attempt
    pub fn record_call(&mut self, now: f64) {
        if self.counting {
            self.total += 1;
            self.sample(now);
        }
    }

    /// Count a call denied at initiation
    pub fn record_blocked(&mut self, now: f64) {
        if self.counting {
            self.blocked += 1;
            self.sample(now);
        }
    }

    /// Count a call denied at handover
    pub fn record_dropped(&mut self, now: f64) {
        if self.counting {
            self.dropped += 1;
            self.sample(now);
        }
    }

    /// Count a call that reached its termination
    pub fn record_completed(&mut self) {
        if self.counting {
            self.completed += 1;
        }
    }

    /// Count a successful handover
    pub fn record_handover(&mut self) {
        if self.counting {
            self.handovers += 1;
        }
    }

    fn sample(&mut self, time: f64) {
        let (total, blocked, dropped) = (self.total, self.blocked, self.dropped);
        if let Some(history) = self.history.as_mut() {
            if total > 0 {
                history.push(RatioSample {
                    time,
                    total,
                    blocked,
                    dropped,
                    blocked_ratio: blocked as f64 / total as f64,
                    dropped_ratio: dropped as f64 / total as f64,
                });
            }
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn blocked(&self) -> u64 {
        self.blocked
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn handovers(&self) -> u64 {
        self.handovers
    }

    /// Fraction of counted calls that were blocked
    pub fn blocked_ratio(&self) -> Result<f64> {
        self.ratio(self.blocked)
    }

    /// Fraction of counted calls that were dropped
    pub fn dropped_ratio(&self) -> Result<f64> {
        self.ratio(self.dropped)
    }

    fn ratio(&self, count: u64) -> Result<f64> {
        if self.total == 0 {
            return Err(SimError::EmptyStatistics);
        }
        Ok(count as f64 / self.total as f64)
    }

    /// Recorded ratio samples (empty unless history recording is enabled)
    pub fn history(&self) -> &[RatioSample] {
        self.history.as_deref().unwrap_or(&[])
    }

    /// Take ownership of the recorded samples
    pub fn take_history(&mut self) -> Vec<RatioSample> {
        self.history.as_mut().map(std::mem::take).unwrap_or_default()
    }
}
