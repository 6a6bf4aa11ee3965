//! Highway Arrival Generation Library
//!
//! This crate supplies the arrival stream consumed by `hwy-core`:
//!
//! - **RandomArrivals**: seeded generator drawing every call parameter from a
//!   configurable [`Distribution`]
//! - **ArrivalLog**: numbered arrival list saved as JSON, replayable as an
//!   arrival source
//!
//! # Example
//!
//! ```rust
//! use hwy_core::{Simulation, SimulationConfig};
//! use hwy_gen::{ArrivalDistributions, RandomArrivals};
//!
//! let config = SimulationConfig {
//!     event_count: 500,
//!     ..Default::default()
//! };
//!
//! let mut arrivals = RandomArrivals::new(&ArrivalDistributions::default(), 42)
//!     .unwrap()
//!     .with_recording();
//!
//! let mut sim = Simulation::new(config).unwrap();
//! let report = sim.run(&mut arrivals).unwrap();
//! assert_eq!(report.total, 500);
//!
//! // Replaying the recorded arrivals reproduces the run
//! let log = arrivals.take_log().unwrap();
//! let mut replay = Simulation::new(sim.config().clone()).unwrap();
//! assert_eq!(replay.run(&mut log.into_source()).unwrap(), report);
//! ```

pub mod distribution;
pub mod error;
pub mod generator;
pub mod log;

pub use distribution::{Distribution, Sampler};
pub use error::GenError;
pub use generator::{ArrivalDistributions, RandomArrivals};
pub use log::{ArrivalEntry, ArrivalLog};
