use crate::models::{Gene, GeneBounds};
use rand::Rng;
use serde::{Deserialize, Serialize};

// ============================================================
// Rate
// ============================================================
#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq))]
#[error("{name} must be between 0.0 and 1.0, got: {value}")]
pub struct RateOutOfRange {
    name: &'static str,
    value: f64,
}

impl RateOutOfRange {
    pub(crate) fn validate(name: &'static str, value: f64) -> Result<f64, Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(Self { name, value });
        }

        Ok(value)
    }
}

// ============================================================
// Mutagen
// ============================================================

/// Bounded step mutation.
///
/// Each call performs `round(mutation_rate * genome_length)` trials. A trial
/// picks a random gene and moves it one step up or down (direction chosen
/// uniformly), where a step is [`GeneBounds::mutation_step`], then clamps the
/// gene back into the bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Mutagen {
    mutation_rate: f64,
}

impl Mutagen {
    pub fn new(mutation_rate: f64) -> Result<Self, RateOutOfRange> {
        let mutation_rate = RateOutOfRange::validate("mutation_rate", mutation_rate)?;

        Ok(Self { mutation_rate })
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn trials(&self, genome_length: usize) -> usize {
        (self.mutation_rate * genome_length as f64).round() as usize
    }

    /// Returns a mutated copy of `genes`.
    pub fn mutate<R: Rng>(&self, rng: &mut R, genes: &[Gene], bounds: &GeneBounds) -> Vec<Gene> {
        let mut mutated = genes.to_vec();
        if mutated.is_empty() {
            return mutated;
        }

        let step = bounds.mutation_step();
        for _ in 0..self.trials(mutated.len()) {
            let index = rng.random_range(0..mutated.len());
            let direction = if rng.random_bool(0.5) { 1 } else { -1 };

            mutated[index] = bounds.clamp(mutated[index].saturating_add(direction * step));
        }

        mutated
    }
}
