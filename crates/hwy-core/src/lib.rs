//! Highway Call Simulation Core
//!
//! A discrete-event simulation of channel occupancy along a line of cellular
//! base stations. Vehicles drive along the highway while on a call; each call
//! is initiated at one station, handed over between adjacent stations as the
//! vehicle crosses their boundaries, and finally terminated.
//!
//! # Architecture
//!
//! - **Geometry** ([`Geometry`]): when and where a call crosses into the next
//!   station
//! - **Channel pool** ([`ChannelPool`]): free channels per station, with a
//!   guard band reserved for handovers
//! - **Scheduler** ([`Scheduler`]): events ordered by time, ties broken by
//!   scheduling order
//! - **Engine** ([`Simulation`]): the event loop and call lifecycle
//! - **Statistics** ([`Statistics`]): total, blocked and dropped calls, gated
//!   by an optional warm-up period
//!
//! # Example
//!
//! ```rust
//! use hwy_core::{Arrival, Direction, Simulation, SimulationConfig};
//!
//! let config = SimulationConfig {
//!     reserved_channel: 0,
//!     base_count: 3,
//!     base_diameter: 10.0,
//!     base_channel: 2,
//!     event_count: 1,
//!     ..Default::default()
//! };
//!
//! let arrivals = vec![Arrival {
//!     time: 0.0,
//!     station: 0,
//!     offset: 8.0,
//!     duration: 100.0,
//!     velocity: 1.0,
//!     direction: Direction::Right,
//! }];
//!
//! let mut sim = Simulation::new(config).unwrap();
//! let report = sim.run(&mut arrivals.into_iter()).unwrap();
//! assert_eq!(report.total, 1);
//! assert_eq!(report.handovers, 2);
//! ```

pub mod arrival;
pub mod channels;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod geometry;
pub mod scheduler;
pub mod stats;
pub mod sweep;

pub use arrival::{Arrival, ArrivalSource, Direction};
pub use channels::ChannelPool;
pub use config::{SimulationConfig, WarmUp};
pub use engine::{DispatchRecord, Outcome, Simulation, SimulationReport};
pub use error::{ConfigError, Result, SimError};
pub use events::{Event, EventKind, TerminationCause};
pub use geometry::{Geometry, Hop, Leg};
pub use scheduler::{ScheduledEvent, Scheduler};
pub use stats::{RatioSample, Statistics};
pub use sweep::{sweep_reserved, SweepPoint};
