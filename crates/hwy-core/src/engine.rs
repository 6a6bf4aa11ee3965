//! Simulation engine
//!
//! [`Simulation`] owns every piece of mutable state for one run: the event
//! queue, the channel pool, the statistics and the clock. It repeatedly pops
//! the earliest event, advances the clock, and applies the call lifecycle:
//!
//! - **Initiation**: admitted if the station has a channel beyond the guard
//!   band, otherwise blocked
//! - **Handover**: frees the vacated station, then takes any free channel at
//!   the new one, otherwise the call is dropped
//! - **Termination**: frees the call's channel
//!
//! Handover chains are plain follow-up events; the loop never recurses.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::arrival::{Arrival, ArrivalSource, Direction};
use crate::channels::ChannelPool;
use crate::config::SimulationConfig;
use crate::error::{Result, SimError};
use crate::events::{Event, EventKind, TerminationCause};
use crate::geometry::{Geometry, Hop, Leg};
use crate::scheduler::Scheduler;
use crate::stats::{RatioSample, Statistics};

/// What happened to a call when one of its events was dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// New call took a channel
    Admitted,
    /// New call found no channel outside the guard band
    Blocked,
    /// Call moved into the next station
    HandedOver,
    /// Call found no channel at the station it entered
    Dropped,
    /// Call ended and freed its channel
    Released(TerminationCause),
}

/// One dispatched event, in dispatch order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// Scheduling sequence number of the event
    pub seq: u64,
    /// Simulation time of dispatch
    pub time: f64,
    /// Kind of event
    pub kind: EventKind,
    /// Station the event targeted
    pub station: usize,
    /// Result of processing the event
    pub outcome: Outcome,
}

/// Final results of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Guard band used for the run
    pub reserved_channel: u32,
    /// Calls counted
    pub total: u64,
    /// Calls blocked at initiation
    pub blocked: u64,
    /// Calls dropped at handover
    pub dropped: u64,
    /// Calls that reached a termination
    pub completed: u64,
    /// Successful handovers
    pub handovers: u64,
    /// `blocked / total`, `None` when nothing was counted
    pub blocked_ratio: Option<f64>,
    /// `dropped / total`, `None` when nothing was counted
    pub dropped_ratio: Option<f64>,
    /// Clock value after the last event
    pub end_time: f64,
    /// Number of events dispatched
    pub events_dispatched: u64,
    /// Arrivals pulled from the source
    pub arrivals_drawn: u64,
    /// Ratio samples, when history recording was enabled
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<RatioSample>,
}

impl SimulationReport {
    /// Blocked-call line in the classic report format
    pub fn blocked_display(&self) -> String {
        format_ratio_line("Blocked call", self.blocked, self.total, self.blocked_ratio)
    }

    /// Dropped-call line in the classic report format
    pub fn dropped_display(&self) -> String {
        format_ratio_line("Dropped call", self.dropped, self.total, self.dropped_ratio)
    }
}

fn format_ratio_line(label: &str, count: u64, total: u64, ratio: Option<f64>) -> String {
    match ratio {
        Some(r) => format!("{}: {}/{} ({}%)", label, count, total, r * 100.0),
        None => format!("{}: {}/{} (---)", label, count, total),
    }
}

/// A single simulation run
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    geometry: Geometry,
    channels: ChannelPool,
    scheduler: Scheduler,
    stats: Statistics,
    clock: f64,
    arrivals_drawn: u64,
    events_dispatched: u64,
    started: bool,
}

impl Simulation {
    /// Create a run, rejecting invalid configurations
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        info!(
            reserved_channel = config.reserved_channel,
            base_count = config.base_count,
            base_diameter = config.base_diameter,
            base_channel = config.base_channel,
            event_count = config.event_count,
            warm_up = ?config.warm_up,
            "Creating simulation"
        );

        Ok(Self {
            geometry: Geometry::new(config.base_diameter, config.base_count),
            channels: ChannelPool::new(
                config.base_count,
                config.base_channel,
                config.reserved_channel,
            ),
            scheduler: Scheduler::new(),
            stats: Statistics::new(config.warm_up, config.record_history),
            clock: 0.0,
            arrivals_drawn: 0,
            events_dispatched: 0,
            started: false,
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current simulation time
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Channel counters
    pub fn channels(&self) -> &ChannelPool {
        &self.channels
    }

    /// Statistics gathered so far
    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// Pending event queue
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Number of active calls currently holding a channel at `station`
    pub fn calls_holding(&self, station: usize) -> usize {
        self.scheduler
            .pending()
            .filter(|s| s.event.held_station() == Some(station))
            .count()
    }

    /// Pull the first arrival; later calls are no-ops
    pub fn start<S: ArrivalSource + ?Sized>(&mut self, source: &mut S) -> Result<()> {
        if !self.started {
            self.started = true;
            self.draw_arrival(source)?;
        }
        Ok(())
    }

    /// Dispatch the earliest pending event
    ///
    /// Returns `Ok(None)` once the queue has drained.
    pub fn step<S: ArrivalSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<Option<DispatchRecord>> {
        self.start(source)?;

        let Some(scheduled) = self.scheduler.pop_next() else {
            return Ok(None);
        };

        let event = scheduled.event;
        self.clock = event.time();
        self.stats.observe_clock(self.clock);
        self.events_dispatched += 1;

        let outcome = match event {
            Event::Initiation {
                station,
                offset,
                duration,
                velocity,
                direction,
                ..
            } => self.on_initiation(source, station, offset, duration, velocity, direction)?,
            Event::Termination { station, cause, .. } => self.on_termination(station, cause)?,
            Event::Handover {
                station,
                remaining_duration,
                velocity,
                direction,
                ..
            } => self.on_handover(station, remaining_duration, velocity, direction)?,
        };

        debug!(
            seq = scheduled.seq,
            time = self.clock,
            kind = ?event.kind(),
            station = event.station(),
            ?outcome,
            "Dispatched event"
        );

        Ok(Some(DispatchRecord {
            seq: scheduled.seq,
            time: self.clock,
            kind: event.kind(),
            station: event.station(),
            outcome,
        }))
    }

    /// Run until the queue drains and report the results
    pub fn run<S: ArrivalSource + ?Sized>(&mut self, source: &mut S) -> Result<SimulationReport> {
        info!(event_count = self.config.event_count, "Starting simulation");
        loop {
            match self.step(source) {
                Ok(Some(_)) => {}
                Ok(None) => break,
                Err(e) => {
                    error!(time = self.clock, error = %e, "Simulation aborted");
                    return Err(e);
                }
            }
        }

        let report = self.report();
        info!(
            total = report.total,
            blocked = report.blocked,
            dropped = report.dropped,
            end_time = report.end_time,
            "Simulation complete"
        );
        Ok(report)
    }

    /// Run until the queue drains, recording every dispatched event
    pub fn run_traced<S: ArrivalSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<(SimulationReport, Vec<DispatchRecord>)> {
        let mut trace = Vec::new();
        while let Some(record) = self.step(source)? {
            trace.push(record);
        }
        Ok((self.report(), trace))
    }

    /// Snapshot of the results so far
    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            reserved_channel: self.config.reserved_channel,
            total: self.stats.total(),
            blocked: self.stats.blocked(),
            dropped: self.stats.dropped(),
            completed: self.stats.completed(),
            handovers: self.stats.handovers(),
            blocked_ratio: self.stats.blocked_ratio().ok(),
            dropped_ratio: self.stats.dropped_ratio().ok(),
            end_time: self.clock,
            events_dispatched: self.events_dispatched,
            arrivals_drawn: self.arrivals_drawn,
            history: self.stats.history().to_vec(),
        }
    }

    /// Schedule the next arrival, if the budget and the source allow it
    fn draw_arrival<S: ArrivalSource + ?Sized>(&mut self, source: &mut S) -> Result<()> {
        if self.arrivals_drawn >= self.config.event_count {
            return Ok(());
        }
        let Some(arrival) = source.next_arrival() else {
            debug!(drawn = self.arrivals_drawn, "Arrival source exhausted");
            return Ok(());
        };
        self.validate_arrival(&arrival)?;
        self.arrivals_drawn += 1;
        self.scheduler.schedule(Event::from(arrival));
        Ok(())
    }

    fn validate_arrival(&self, arrival: &Arrival) -> Result<()> {
        let invalid = |reason: String| Err(SimError::InvalidArrival { reason });

        if !arrival.time.is_finite() || arrival.time < self.clock {
            return invalid(format!(
                "arrival time {} is before the current clock {}",
                arrival.time, self.clock
            ));
        }
        if arrival.station >= self.config.base_count {
            return invalid(format!(
                "station {} out of range (base_count {})",
                arrival.station, self.config.base_count
            ));
        }
        if !arrival.offset.is_finite()
            || arrival.offset < 0.0
            || arrival.offset >= self.config.base_diameter
        {
            return invalid(format!(
                "offset {} outside station coverage [0, {})",
                arrival.offset, self.config.base_diameter
            ));
        }
        if !arrival.duration.is_finite() || arrival.duration < 0.0 {
            return invalid(format!("duration {} is not a valid time", arrival.duration));
        }
        if !arrival.velocity.is_finite() || arrival.velocity <= 0.0 {
            return Err(SimError::InvalidVelocity {
                velocity: arrival.velocity,
            });
        }
        Ok(())
    }

    fn on_initiation<S: ArrivalSource + ?Sized>(
        &mut self,
        source: &mut S,
        station: usize,
        offset: f64,
        duration: f64,
        velocity: f64,
        direction: Direction,
    ) -> Result<Outcome> {
        self.draw_arrival(source)?;
        self.stats.record_call(self.clock);

        if !self.channels.try_acquire_for_initiation(station) {
            debug!(station, time = self.clock, "Call blocked");
            self.stats.record_blocked(self.clock);
            return Ok(Outcome::Blocked);
        }

        let leg = self
            .geometry
            .next_hop(station, Some(offset), duration, velocity, direction)?;
        self.schedule_leg(station, leg, duration, velocity, direction);
        Ok(Outcome::Admitted)
    }

    fn on_termination(&mut self, station: usize, cause: TerminationCause) -> Result<Outcome> {
        self.channels.release(station)?;
        self.stats.record_completed();
        Ok(Outcome::Released(cause))
    }

    fn on_handover(
        &mut self,
        station: usize,
        remaining_duration: f64,
        velocity: f64,
        direction: Direction,
    ) -> Result<Outcome> {
        let previous = Geometry::previous_station(station, direction)
            .ok_or(SimError::OrphanHandover { station })?;
        self.channels.release(previous)?;

        if !self.channels.try_acquire_for_handover(station) {
            debug!(station, time = self.clock, "Call dropped");
            self.stats.record_dropped(self.clock);
            return Ok(Outcome::Dropped);
        }
        self.stats.record_handover();

        let leg = self
            .geometry
            .next_hop(station, None, remaining_duration, velocity, direction)?;
        self.schedule_leg(station, leg, remaining_duration, velocity, direction);
        Ok(Outcome::HandedOver)
    }

    /// Schedule whatever ends the call's leg in `station`
    fn schedule_leg(
        &mut self,
        station: usize,
        leg: Leg,
        duration: f64,
        velocity: f64,
        direction: Direction,
    ) {
        let time = self.clock + leg.elapsed;
        let event = match leg.hop {
            Hop::Handover(next) => Event::Handover {
                time,
                station: next,
                remaining_duration: duration - leg.elapsed,
                velocity,
                direction,
            },
            Hop::Complete => Event::Termination {
                time,
                station,
                cause: TerminationCause::Completed,
            },
            Hop::LeavesHighway => Event::Termination {
                time,
                station,
                cause: TerminationCause::LeftHighway,
            },
        };
        self.scheduler.schedule(event);
    }
}
