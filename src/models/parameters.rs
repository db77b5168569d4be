use super::{Gene, RateOutOfRange};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Capacity assumed for every lane when none is given.
pub const DEFAULT_CAPACITY: u32 = 20;

#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum ParameterError {
    #[error("population_size must be at least 1")]
    EmptyPopulation,
    #[error("num_lights must be at least 1")]
    NoLights,
    #[error("green_min must not be negative, got {0}")]
    NegativeGreen(Gene),
    #[error("cycle_time must be positive, got {0}")]
    NonPositiveCycle(Gene),
    #[error(transparent)]
    Rate(#[from] RateOutOfRange),
    #[error("beta must be finite and non-negative, got {0}")]
    InvalidBeta(f64),
    #[error("expected {expected} {name} values, got {provided}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        provided: usize,
    },
    #[error("capacity of lane {lane} must be positive")]
    ZeroCapacity { lane: usize },
}

/// Tunables of the genetic algorithm.
///
/// Deserializes with `#[serde(default)]`, so a partial JSON document overrides
/// only the fields it names:
///
/// ```rust
/// use signal_timing_ga::models::Parameters;
///
/// let parameters: Parameters = serde_json::from_str(r#"{"max_iter": 50}"#)?;
/// assert_eq!(parameters.max_iter, 50);
/// assert_eq!(parameters.population_size, 400);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub population_size: usize,
    pub num_lights: usize,
    pub max_iter: u32,
    pub green_min: Gene,
    pub green_max: Gene,
    pub cycle_time: Gene,
    pub mutation_rate: f64,
    /// Accepted and validated, but inversion is only used to top up a stalled
    /// generation and does not consult this rate.
    pub inversion_rate: f64,
    pub beta: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            population_size: 400,
            num_lights: 4,
            max_iter: 25,
            green_min: 10,
            green_max: 60,
            // 160 s cycle less 12 s of lost time
            cycle_time: 148,
            mutation_rate: 0.02,
            inversion_rate: 0.2,
            beta: 8.0,
        }
    }
}

impl Parameters {
    /// Checks everything that makes the parameters meaningless. Whether any
    /// timing can satisfy the bounds and the cycle is decided when the initial
    /// population is drawn.
    #[instrument(level = "debug", skip(self))]
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.population_size == 0 {
            return Err(ParameterError::EmptyPopulation);
        }
        if self.num_lights == 0 {
            return Err(ParameterError::NoLights);
        }
        if self.green_min < 0 {
            return Err(ParameterError::NegativeGreen(self.green_min));
        }
        if self.cycle_time <= 0 {
            return Err(ParameterError::NonPositiveCycle(self.cycle_time));
        }
        RateOutOfRange::validate("mutation_rate", self.mutation_rate)?;
        RateOutOfRange::validate("inversion_rate", self.inversion_rate)?;
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(ParameterError::InvalidBeta(self.beta));
        }

        Ok(())
    }

    /// Checks a per-lane input against `num_lights`.
    pub(crate) fn check_lanes(&self, name: &'static str, values: &[u32]) -> Result<(), ParameterError> {
        if values.len() != self.num_lights {
            return Err(ParameterError::LengthMismatch {
                name,
                expected: self.num_lights,
                provided: values.len(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_has_valid_defaults() {
        assert!(Parameters::default().validate().is_ok());
    }

    #[test]
    fn it_rejects_meaningless_parameters() {
        let cases = [
            (
                Parameters {
                    population_size: 0,
                    ..Default::default()
                },
                ParameterError::EmptyPopulation,
            ),
            (
                Parameters {
                    num_lights: 0,
                    ..Default::default()
                },
                ParameterError::NoLights,
            ),
            (
                Parameters {
                    green_min: -1,
                    ..Default::default()
                },
                ParameterError::NegativeGreen(-1),
            ),
            (
                Parameters {
                    cycle_time: 0,
                    ..Default::default()
                },
                ParameterError::NonPositiveCycle(0),
            ),
            (
                Parameters {
                    beta: -1.0,
                    ..Default::default()
                },
                ParameterError::InvalidBeta(-1.0),
            ),
        ];

        for (parameters, expected) in cases {
            assert_eq!(parameters.validate(), Err(expected));
        }
    }

    #[test]
    fn it_rejects_rates_out_of_range() {
        let parameters = Parameters {
            inversion_rate: 1.2,
            ..Default::default()
        };

        assert!(matches!(
            parameters.validate(),
            Err(ParameterError::Rate(_))
        ));
    }

    #[test]
    fn it_accepts_inverted_green_bounds() {
        // reported as infeasible by the initializer instead
        let parameters = Parameters {
            green_min: 80,
            ..Default::default()
        };

        assert!(parameters.validate().is_ok());
    }

    #[test]
    fn it_merges_partial_json_onto_defaults() {
        let parameters: Parameters =
            serde_json::from_str(r#"{"population_size": 50, "beta": 4.0}"#).unwrap();

        assert_eq!(
            parameters,
            Parameters {
                population_size: 50,
                beta: 4.0,
                ..Default::default()
            }
        );
    }

    #[test]
    fn it_checks_lane_counts() {
        let parameters = Parameters::default();

        assert!(parameters.check_lanes("cars", &[1, 2, 3, 4]).is_ok());
        assert_eq!(
            parameters.check_lanes("cars", &[1, 2, 3]),
            Err(ParameterError::LengthMismatch {
                name: "cars",
                expected: 4,
                provided: 3
            })
        );
    }
}
