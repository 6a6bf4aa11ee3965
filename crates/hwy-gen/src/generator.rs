//! Seeded random arrival generator

use hwy_core::{Arrival, Direction};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::distribution::{Distribution, Sampler};
use crate::error::GenError;
use crate::log::ArrivalLog;

/// Distributions for every arrival field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalDistributions {
    /// Time of the first arrival
    #[serde(default = "default_first_arrival")]
    pub first_arrival: Distribution,
    /// Gap between consecutive arrivals
    pub inter_arrival_time: Distribution,
    /// Originating station (floored to an index)
    pub base_station: Distribution,
    /// Position within the originating station
    pub call_loc_offset: Distribution,
    /// Call duration
    pub call_duration: Distribution,
    /// Vehicle speed
    pub car_velocity: Distribution,
    /// Probability that a vehicle travels right
    #[serde(default = "default_right_probability")]
    pub right_probability: f64,
}

fn default_first_arrival() -> Distribution {
    Distribution::Constant { value: 0.0 }
}

fn default_right_probability() -> f64 {
    0.5
}

impl Default for ArrivalDistributions {
    fn default() -> Self {
        Self {
            first_arrival: default_first_arrival(),
            inter_arrival_time: Distribution::Exponential { mean: 1.37 },
            base_station: Distribution::UniformInt { low: 0, high: 20 },
            call_loc_offset: Distribution::Uniform { low: 0.0, high: 2000.0 },
            call_duration: Distribution::Exponential { mean: 99.83 },
            car_velocity: Distribution::Normal { mean: 33.35, std_dev: 2.5 },
            right_probability: default_right_probability(),
        }
    }
}

#[derive(Debug, Clone)]
struct Samplers {
    first_arrival: Sampler,
    inter_arrival_time: Sampler,
    base_station: Sampler,
    call_loc_offset: Sampler,
    call_duration: Sampler,
    car_velocity: Sampler,
}

impl ArrivalDistributions {
    fn samplers(&self) -> Result<Samplers, GenError> {
        if !(0.0..=1.0).contains(&self.right_probability) {
            return Err(GenError::InvalidProbability {
                field: "right_probability",
                value: self.right_probability,
            });
        }
        Ok(Samplers {
            first_arrival: self.first_arrival.sampler("first_arrival")?,
            inter_arrival_time: self.inter_arrival_time.sampler("inter_arrival_time")?,
            base_station: self.base_station.sampler("base_station")?,
            call_loc_offset: self.call_loc_offset.sampler("call_loc_offset")?,
            call_duration: self.call_duration.sampler("call_duration")?,
            car_velocity: self.car_velocity.sampler("car_velocity")?,
        })
    }
}

/// Endless stream of random arrivals
///
/// The same distributions and seed always produce the same sequence. Arrival
/// times are the running sum of sampled inter-arrival gaps.
#[derive(Debug, Clone)]
pub struct RandomArrivals {
    rng: ChaCha8Rng,
    samplers: Samplers,
    right_probability: f64,
    next_time: f64,
    produced: u64,
    log: Option<ArrivalLog>,
}

impl RandomArrivals {
    /// Create a generator, rejecting unusable distributions
    pub fn new(distributions: &ArrivalDistributions, seed: u64) -> Result<Self, GenError> {
        let samplers = distributions.samplers()?;
        debug!(
            inter_arrival_mean = distributions.inter_arrival_time.mean(),
            duration_mean = distributions.call_duration.mean(),
            velocity_mean = distributions.car_velocity.mean(),
            right_probability = distributions.right_probability,
            "Arrival distributions"
        );
        Ok(Self::seeded(samplers, distributions.right_probability, seed))
    }

    fn seeded(samplers: Samplers, right_probability: f64, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let next_time = samplers.first_arrival.sample(&mut rng);
        info!(seed, first_arrival = next_time, "Arrival generator ready");

        Self {
            rng,
            samplers,
            right_probability,
            next_time,
            produced: 0,
            log: None,
        }
    }

    /// Fresh generator with the same distributions and a different seed
    ///
    /// Recording carries over, starting from an empty log.
    pub fn reseeded(&self, seed: u64) -> Self {
        let mut fresh = Self::seeded(self.samplers.clone(), self.right_probability, seed);
        if self.log.is_some() {
            fresh.log = Some(ArrivalLog::new());
        }
        fresh
    }

    /// Keep a copy of every produced arrival
    pub fn with_recording(mut self) -> Self {
        self.log = Some(ArrivalLog::new());
        self
    }

    /// Number of arrivals produced so far
    pub fn produced(&self) -> u64 {
        self.produced
    }

    /// Arrivals recorded so far, if recording is enabled
    pub fn log(&self) -> Option<&ArrivalLog> {
        self.log.as_ref()
    }

    /// Take the recorded arrivals, leaving recording enabled with an empty log
    pub fn take_log(&mut self) -> Option<ArrivalLog> {
        self.log.as_mut().map(std::mem::take)
    }

    fn generate(&mut self) -> Arrival {
        let rng = &mut self.rng;
        let s = &self.samplers;

        // Float-to-int casts saturate, so negative samples land on station 0
        let station = s.base_station.sample(rng).floor() as usize;
        let offset = s.call_loc_offset.sample(rng);
        let duration = s.call_duration.sample(rng);
        let velocity = s.car_velocity.sample(rng);
        let direction = if rng.gen_bool(self.right_probability) {
            Direction::Right
        } else {
            Direction::Left
        };

        let arrival = Arrival {
            time: self.next_time,
            station,
            offset,
            duration,
            velocity,
            direction,
        };
        self.next_time += s.inter_arrival_time.sample(rng);
        arrival
    }
}

impl Iterator for RandomArrivals {
    type Item = Arrival;

    fn next(&mut self) -> Option<Arrival> {
        let arrival = self.generate();
        self.produced += 1;
        debug!(number = self.produced, ?arrival, "Arrival generated");
        if let Some(log) = self.log.as_mut() {
            log.push(arrival);
        }
        Some(arrival)
    }
}
