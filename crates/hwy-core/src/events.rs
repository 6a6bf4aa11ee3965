//! Simulation events
//!
//! Every call is represented only by the events it generates. A dispatched
//! event is consumed; follow-up events are always fresh values derived from
//! it.

use serde::{Deserialize, Serialize};

use crate::arrival::{Arrival, Direction};
use crate::geometry::Geometry;

/// Why a call released its last channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationCause {
    /// The call's duration ran out
    Completed,
    /// The vehicle drove past the end of the modeled highway
    LeftHighway,
}

/// A pending simulation event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// A new call attempts to take a channel
    Initiation {
        /// Scheduled time
        time: f64,
        /// Originating station
        station: usize,
        /// Position within the station's coverage
        offset: f64,
        /// Total call duration
        duration: f64,
        /// Vehicle speed
        velocity: f64,
        /// Direction of travel
        direction: Direction,
    },

    /// An active call ends and frees its channel
    Termination {
        /// Scheduled time
        time: f64,
        /// Station holding the call's channel
        station: usize,
        /// Why the call ended
        cause: TerminationCause,
    },

    /// An active call crosses into a neighbouring station
    Handover {
        /// Scheduled time
        time: f64,
        /// Station being entered
        station: usize,
        /// Call duration left on entry
        remaining_duration: f64,
        /// Vehicle speed
        velocity: f64,
        /// Direction of travel
        direction: Direction,
    },
}

/// Discriminant of [`Event`], for logs and dispatch traces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Initiation,
    Termination,
    Handover,
}

impl Event {
    /// Scheduled time
    pub fn time(&self) -> f64 {
        match self {
            Event::Initiation { time, .. }
            | Event::Termination { time, .. }
            | Event::Handover { time, .. } => *time,
        }
    }

    /// Station the event targets
    pub fn station(&self) -> usize {
        match self {
            Event::Initiation { station, .. }
            | Event::Termination { station, .. }
            | Event::Handover { station, .. } => *station,
        }
    }

    /// Event discriminant
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Initiation { .. } => EventKind::Initiation,
            Event::Termination { .. } => EventKind::Termination,
            Event::Handover { .. } => EventKind::Handover,
        }
    }

    /// Station whose channel the pending call currently holds
    ///
    /// A pending termination holds its own station; a pending handover still
    /// holds the station it is about to vacate. Initiations hold nothing, and
    /// neither does a handover with no station behind it.
    pub fn held_station(&self) -> Option<usize> {
        match self {
            Event::Initiation { .. } => None,
            Event::Termination { station, .. } => Some(*station),
            Event::Handover {
                station, direction, ..
            } => Geometry::previous_station(*station, *direction),
        }
    }
}

impl From<Arrival> for Event {
    fn from(arrival: Arrival) -> Self {
        Event::Initiation {
            time: arrival.time,
            station: arrival.station,
            offset: arrival.offset,
            duration: arrival.duration,
            velocity: arrival.velocity,
            direction: arrival.direction,
        }
    }
}
