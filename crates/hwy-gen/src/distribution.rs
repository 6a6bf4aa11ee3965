//! Sampling distributions for arrival parameters
//!
//! Each arrival field is drawn from a [`Distribution`], configured as a tagged
//! JSON object such as `{"dist": "exponential", "mean": 1.37}`.

use rand::distributions::Uniform;
use rand::Rng;
use rand_distr::{Distribution as _, Exp, Normal};
use serde::{Deserialize, Serialize};

use crate::error::GenError;

/// A one-dimensional distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dist", rename_all = "snake_case")]
pub enum Distribution {
    /// Always the same value
    Constant { value: f64 },
    /// Continuous uniform on `[low, high)`
    Uniform { low: f64, high: f64 },
    /// Integer uniform on `[low, high)`
    UniformInt { low: i64, high: i64 },
    /// Exponential with the given mean
    Exponential { mean: f64 },
    /// Gaussian
    Normal { mean: f64, std_dev: f64 },
}

impl Distribution {
    /// Check parameters and build a sampler
    ///
    /// `field` names the arrival field in error messages.
    pub fn sampler(&self, field: &'static str) -> Result<Sampler, GenError> {
        let invalid = |reason: String| GenError::InvalidDistribution { field, reason };

        let sampler = match *self {
            Distribution::Constant { value } => {
                if !value.is_finite() {
                    return Err(invalid(format!("constant {} is not finite", value)));
                }
                Sampler::Constant(value)
            }
            Distribution::Uniform { low, high } => {
                if !(low.is_finite() && high.is_finite() && low < high) {
                    return Err(invalid(format!("empty range [{}, {})", low, high)));
                }
                Sampler::Uniform(Uniform::new(low, high))
            }
            Distribution::UniformInt { low, high } => {
                if low >= high {
                    return Err(invalid(format!("empty range [{}, {})", low, high)));
                }
                Sampler::UniformInt(Uniform::new(low, high))
            }
            Distribution::Exponential { mean } => {
                if !mean.is_finite() || mean <= 0.0 {
                    return Err(invalid(format!("mean {} must be positive", mean)));
                }
                let exp = Exp::new(1.0 / mean).map_err(|e| invalid(e.to_string()))?;
                Sampler::Exponential(exp)
            }
            Distribution::Normal { mean, std_dev } => {
                if !mean.is_finite() || !std_dev.is_finite() || std_dev < 0.0 {
                    return Err(invalid(format!(
                        "mean {} and std_dev {} must be finite, std_dev non-negative",
                        mean, std_dev
                    )));
                }
                let normal = Normal::new(mean, std_dev).map_err(|e| invalid(e.to_string()))?;
                Sampler::Normal(normal)
            }
        };
        Ok(sampler)
    }

    /// Expected value
    pub fn mean(&self) -> f64 {
        match *self {
            Distribution::Constant { value } => value,
            Distribution::Uniform { low, high } => (low + high) / 2.0,
            Distribution::UniformInt { low, high } => (low + high - 1) as f64 / 2.0,
            Distribution::Exponential { mean } | Distribution::Normal { mean, .. } => mean,
        }
    }
}

/// Validated, ready-to-sample form of a [`Distribution`]
#[derive(Debug, Clone)]
pub enum Sampler {
    Constant(f64),
    Uniform(Uniform<f64>),
    UniformInt(Uniform<i64>),
    Exponential(Exp<f64>),
    Normal(Normal<f64>),
}

impl Sampler {
    /// Draw one value
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Sampler::Constant(value) => *value,
            Sampler::Uniform(u) => u.sample(rng),
            Sampler::UniformInt(u) => u.sample(rng) as f64,
            Sampler::Exponential(e) => e.sample(rng),
            Sampler::Normal(n) => n.sample(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_serde_tagged_format() {
        let dist: Distribution =
            serde_json::from_str(r#"{"dist": "exponential", "mean": 1.37}"#).unwrap();
        assert_eq!(dist, Distribution::Exponential { mean: 1.37 });

        let dist: Distribution =
            serde_json::from_str(r#"{"dist": "uniform_int", "low": 0, "high": 20}"#).unwrap();
        assert_eq!(dist, Distribution::UniformInt { low: 0, high: 20 });

        let json = serde_json::to_string(&Distribution::Constant { value: 2.0 }).unwrap();
        assert_eq!(json, r#"{"dist":"constant","value":2.0}"#);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let bad = [
            Distribution::Constant { value: f64::NAN },
            Distribution::Uniform { low: 5.0, high: 5.0 },
            Distribution::UniformInt { low: 3, high: 1 },
            Distribution::Exponential { mean: 0.0 },
            Distribution::Normal { mean: 0.0, std_dev: -1.0 },
        ];
        for dist in bad {
            assert!(
                matches!(
                    dist.sampler("test"),
                    Err(GenError::InvalidDistribution { field: "test", .. })
                ),
                "{:?} should be rejected",
                dist
            );
        }
    }

    #[test]
    fn test_samples_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let uniform = Distribution::Uniform { low: 2.0, high: 3.0 }
            .sampler("offset")
            .unwrap();
        let ints = Distribution::UniformInt { low: 0, high: 4 }
            .sampler("station")
            .unwrap();
        let exp = Distribution::Exponential { mean: 10.0 }
            .sampler("duration")
            .unwrap();

        for _ in 0..1_000 {
            let u = uniform.sample(&mut rng);
            assert!((2.0..3.0).contains(&u));
            let i = ints.sample(&mut rng);
            assert!(i.fract() == 0.0 && (0.0..4.0).contains(&i));
            assert!(exp.sample(&mut rng) >= 0.0);
        }
    }

    #[test]
    fn test_exponential_mean_is_close() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let exp = Distribution::Exponential { mean: 5.0 }
            .sampler("inter_arrival_time")
            .unwrap();
        let n = 20_000;
        let mean: f64 = (0..n).map(|_| exp.sample(&mut rng)).sum::<f64>() / n as f64;
        assert!((mean - 5.0).abs() < 0.25, "sample mean {}", mean);
    }

    #[test]
    fn test_constant_and_mean() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let c = Distribution::Constant { value: 3.5 }.sampler("first_arrival").unwrap();
        assert_eq!(c.sample(&mut rng), 3.5);
        assert_eq!(Distribution::UniformInt { low: 0, high: 5 }.mean(), 2.0);
        assert_eq!(Distribution::Uniform { low: 0.0, high: 1.0 }.mean(), 0.5);
    }
}
