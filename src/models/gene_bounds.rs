use super::Gene;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Fraction of the green-time span moved by a single mutation step.
pub const MUTATION_STEP_FRACTION: f64 = 0.02;

#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum GeneBoundError {
    #[error(
        "InvalidBounds: lower bound must not exceed upper. lower = {lower}, upper={upper}"
    )]
    InvalidBound { lower: Gene, upper: Gene },
}

impl GeneBoundError {
    pub(crate) fn invalid_bound(lower: Gene, upper: Gene) -> Self {
        Self::InvalidBound { lower, upper }
    }
}

/// Closed interval `[lower, upper]` of admissible green times, in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
pub struct GeneBounds {
    pub(crate) lower: Gene,
    pub(crate) upper: Gene,
}

impl GeneBounds {
    #[instrument(level = "debug", fields(lower = lower, upper = upper))]
    pub fn new(lower: Gene, upper: Gene) -> Result<Self, GeneBoundError> {
        if lower > upper {
            return Err(GeneBoundError::invalid_bound(lower, upper));
        };

        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> Gene {
        self.lower
    }

    pub fn upper(&self) -> Gene {
        self.upper
    }

    pub fn span(&self) -> Gene {
        self.upper - self.lower
    }

    pub fn contains(&self, gene: Gene) -> bool {
        (self.lower..=self.upper).contains(&gene)
    }

    pub fn clamp(&self, gene: Gene) -> Gene {
        gene.clamp(self.lower, self.upper)
    }

    /// Size of one mutation step in whole seconds. At least one second unless
    /// the span is empty.
    pub fn mutation_step(&self) -> Gene {
        let span = self.span();
        if span == 0 {
            return 0;
        }

        ((span as f64 * MUTATION_STEP_FRACTION).round() as Gene).max(1)
    }

    /// Draws a gene uniformly from the closed interval.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Gene {
        rng.random_range(self.lower..=self.upper)
    }
}
