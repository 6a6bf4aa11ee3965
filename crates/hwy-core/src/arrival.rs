//! Arrival records consumed by the simulation
//!
//! The simulation pulls new calls lazily from an [`ArrivalSource`], one
//! arrival per processed initiation, up to the configured event count.

use serde::{Deserialize, Serialize};

/// Direction of travel along the highway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards station 0
    Left,
    /// Towards station `base_count - 1`
    Right,
}

/// A new call entering the system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrival {
    /// Absolute simulation time of the call attempt
    pub time: f64,
    /// Originating station
    pub station: usize,
    /// Position within the station's coverage, measured from its left edge
    pub offset: f64,
    /// Total call duration
    pub duration: f64,
    /// Vehicle speed (distance per time unit)
    pub velocity: f64,
    /// Direction of travel
    pub direction: Direction,
}

/// Pull-based, finite stream of arrivals
///
/// Implemented for every `Iterator<Item = Arrival>`, so a `Vec` of arrivals
/// (via `into_iter()`) or a random generator both work.
pub trait ArrivalSource {
    /// Produce the next arrival, or `None` when the stream is exhausted
    fn next_arrival(&mut self) -> Option<Arrival>;
}

impl<I> ArrivalSource for I
where
    I: Iterator<Item = Arrival>,
{
    fn next_arrival(&mut self) -> Option<Arrival> {
        self.next()
    }
}
