//! Parent selection.
//!
//! Parents are drawn with a Boltzmann-weighted roulette wheel: every candidate
//! receives the weight
//!
//! ```text
//! w_i = exp(-beta * delay_i / worst)
//! ```
//!
//! where `worst` is the largest delay in the population. Weights are normalized
//! and sampled as a categorical distribution, so lower delays are selected more
//! often. `beta` sets the selection pressure:
//!
//! | beta | Pressure |
//! |------|----------|
//! | 0    | None, uniform selection |
//! | 1-4  | Mild |
//! | 8    | Default, the best candidate is ~e^8 times likelier than the worst |
//! | 16+  | Strong, risk of premature convergence |
//!
//! When the weights cannot form a distribution (a zero or non-finite `worst`,
//! non-finite weights, or all weights underflowing to zero) selection falls back
//! to a uniform draw. Selection never fails.

use rand::Rng;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Boltzmann-weighted roulette wheel selector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Selector {
    beta: f64,
}

impl Selector {
    /// Creates a selector with selection pressure `beta`. The value is checked
    /// by [`crate::models::Parameters::validate`].
    pub fn boltzmann(beta: f64) -> Self {
        Self { beta }
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Normalized selection probabilities, or `None` when they are degenerate.
    pub fn probabilities(&self, delays: &[f64]) -> Option<Vec<f64>> {
        let worst = delays.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if worst == 0.0 || !worst.is_finite() {
            return None;
        }

        let weights: Vec<f64> = delays
            .iter()
            .map(|delay| (-self.beta * delay / worst).exp())
            .collect();

        let total: f64 = weights.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return None;
        }

        Some(weights.into_iter().map(|weight| weight / total).collect())
    }

    /// Draws the index of one parent. `delays` must not be empty.
    #[instrument(level = "trace", skip(self, rng, delays), fields(beta = self.beta, num_candidates = delays.len()))]
    pub fn select<R: Rng>(&self, rng: &mut R, delays: &[f64]) -> usize {
        let wheel = self
            .probabilities(delays)
            .and_then(|probabilities| WeightedIndex::new(&probabilities).ok());

        match wheel {
            Some(wheel) => rng.sample(wheel),
            None => {
                tracing::debug!("degenerate selection weights, selecting uniformly");
                rng.random_range(0..delays.len())
            }
        }
    }
}
