//! Per-lane queueing delay.
//!
//! The delay of one approach is the sum of a uniform term and an overflow term:
//!
//! ```text
//! a  = (1 - g/C)^2
//! p  = 1 - (g/C) * x
//! d1 = 0.38 * C * a / p
//! d2 = 173 * x^2 * sqrt((x - 1) + (x - 1)^2 + 16 * x / c)
//! ```
//!
//! where `C` is the cycle time, `g` the green time, `x` the saturation ratio and
//! `c` the lane capacity. Evaluations that cannot produce a finite, real value
//! are reported as [`Delay::Penalized`] and scored with [`PENALTY`].

use super::{Congestion, Evaluator, Gene};
use serde::Serialize;
use tracing::instrument;

/// Delay substituted for numerically degenerate evaluations.
pub const PENALTY: f64 = 1e9;

/// `|p|` below this is treated as a zero denominator.
pub const DENOMINATOR_TOLERANCE: f64 = 1e-6;

/// Why a lane evaluation was replaced by the penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Degeneracy {
    NearZeroDenominator,
    NegativeRadicand,
    NonFinite,
}

/// Outcome of evaluating one lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Delay {
    Valid(f64),
    Penalized(Degeneracy),
}

impl Delay {
    /// The delay in seconds, or [`PENALTY`] for degenerate evaluations.
    pub fn value(&self) -> f64 {
        match self {
            Delay::Valid(delay) => *delay,
            Delay::Penalized(_) => PENALTY,
        }
    }

    pub fn is_penalized(&self) -> bool {
        matches!(self, Delay::Penalized(_))
    }
}

/// Delay of a single lane.
pub fn lane_delay(cycle_time: f64, green: f64, saturation: f64, capacity: f64) -> Delay {
    let ratio = green / cycle_time;
    let a = (1.0 - ratio).powi(2);
    let p = 1.0 - ratio * saturation;

    if p.is_nan() {
        return Delay::Penalized(Degeneracy::NonFinite);
    }
    if p.abs() < DENOMINATOR_TOLERANCE {
        return Delay::Penalized(Degeneracy::NearZeroDenominator);
    }

    let uniform = 0.38 * cycle_time * a / p;

    let radicand = (saturation - 1.0) + (saturation - 1.0).powi(2) + 16.0 * saturation / capacity;
    if radicand < 0.0 {
        return Delay::Penalized(Degeneracy::NegativeRadicand);
    }
    let overflow = 173.0 * saturation.powi(2) * radicand.sqrt();

    let delay = uniform + overflow;
    if !delay.is_finite() {
        return Delay::Penalized(Degeneracy::NonFinite);
    }

    Delay::Valid(delay)
}

/// Summed delay of one individual across all lanes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub total_delay: f64,
    pub penalized_lanes: usize,
}

impl FromIterator<Delay> for Evaluation {
    fn from_iter<I: IntoIterator<Item = Delay>>(iter: I) -> Self {
        iter.into_iter().fold(
            Evaluation {
                total_delay: 0.0,
                penalized_lanes: 0,
            },
            |mut acc, delay| {
                acc.total_delay += delay.value();
                acc.penalized_lanes += usize::from(delay.is_penalized());
                acc
            },
        )
    }
}

/// The intersection delay objective for one run.
#[derive(Debug, Clone)]
pub struct DelayModel {
    cycle_time: f64,
    congestion: Congestion,
}

impl DelayModel {
    pub fn new(cycle_time: Gene, congestion: Congestion) -> Self {
        Self {
            cycle_time: cycle_time as f64,
            congestion,
        }
    }

    pub fn congestion(&self) -> &Congestion {
        &self.congestion
    }
}

impl Evaluator for DelayModel {
    #[instrument(level = "trace", skip(self), fields(genes = ?genes))]
    fn evaluate(&self, genes: &[Gene]) -> Evaluation {
        genes
            .iter()
            .zip(self.congestion.lanes())
            .map(|(&green, (saturation, capacity))| {
                let delay = lane_delay(self.cycle_time, green as f64, saturation, capacity);
                if let Delay::Penalized(reason) = delay {
                    tracing::debug!(green, saturation, capacity, ?reason, "lane delay penalized");
                }
                delay
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn it_computes_a_reference_delay() {
        let delay = lane_delay(148.0, 37.0, 0.75, 20.0);

        match delay {
            Delay::Valid(value) => assert!((value - 101.43546938095213).abs() < TOLERANCE),
            Delay::Penalized(reason) => panic!("unexpected penalty: {reason:?}"),
        }
    }

    #[test]
    fn it_penalizes_a_zero_denominator() {
        // g == C and x == 1 gives p == 0
        let delay = lane_delay(148.0, 148.0, 1.0, 20.0);
        assert_eq!(delay, Delay::Penalized(Degeneracy::NearZeroDenominator));
        assert_eq!(delay.value(), PENALTY);
    }

    #[test]
    fn it_penalizes_a_denominator_within_tolerance() {
        let green = 148.0 * (1.0 - 1e-7);
        let delay = lane_delay(148.0, green, 1.0, 20.0);
        assert_eq!(delay.value(), PENALTY);
    }

    #[test]
    fn it_penalizes_a_negative_radicand() {
        // (0.05 - 1) + 0.9025 + 0.04 = -0.0075
        let delay = lane_delay(148.0, 30.0, 0.05, 20.0);
        assert_eq!(delay, Delay::Penalized(Degeneracy::NegativeRadicand));
    }

    #[test]
    fn it_penalizes_non_finite_input() {
        let delay = lane_delay(148.0, f64::NAN, 0.5, 20.0);
        assert_eq!(delay, Delay::Penalized(Degeneracy::NonFinite));
    }

    #[test]
    fn it_is_finite_for_empty_lanes() {
        // x == 0 gives p == 1 and a zero overflow term
        for green in 10..=60 {
            let delay = lane_delay(148.0, green as f64, 0.0, 20.0);
            assert!(!delay.is_penalized());
            assert!(delay.value().is_finite());
        }
    }

    #[test]
    fn it_sums_lanes_and_counts_penalties() {
        let congestion = Congestion::new(&[5, 19, 5, 20], &[20, 20, 20, 20]);
        let model = DelayModel::new(148, congestion);

        let evaluation = model.evaluate(&[37, 37, 37, 37]);

        // lane 1 has x == 0.05 which has a negative radicand
        assert_eq!(evaluation.penalized_lanes, 1);
        assert!(evaluation.total_delay > PENALTY);
        assert!(evaluation.total_delay.is_finite());
    }
}
