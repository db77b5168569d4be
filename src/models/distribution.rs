use crate::models::evaluator::CountingEvaluator;
use crate::models::{Evaluator, GeneBoundError, Gene, Morphology, Population};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Default number of draws allowed per requested individual.
pub const DEFAULT_ATTEMPTS_PER_INDIVIDUAL: usize = 1000;

#[derive(Debug, thiserror::Error)]
pub enum InitializationError {
    #[error("gene bounds admit no green time: {0}")]
    GeneBounds(#[from] GeneBoundError),
    #[error(
        "minimum green sum exceeds the cycle time. min_green_sum={min_green_sum}, cycle_time={cycle_time}"
    )]
    CycleTooShort {
        min_green_sum: Gene,
        cycle_time: Gene,
    },
    #[error(
        "no feasible population after {attempts} draws. accepted={accepted}, required={required}"
    )]
    AttemptsExhausted {
        attempts: usize,
        accepted: usize,
        required: usize,
    },
}

/// Uniform random initial population restricted to genomes that fit the cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Distribution {
    population_size: usize,
    attempts_per_individual: usize,
}

impl Distribution {
    pub fn random(population_size: usize) -> Self {
        Self {
            population_size,
            attempts_per_individual: DEFAULT_ATTEMPTS_PER_INDIVIDUAL,
        }
    }

    pub fn with_attempts_per_individual(mut self, attempts_per_individual: usize) -> Self {
        self.attempts_per_individual = attempts_per_individual.max(1);
        self
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    fn max_attempts(&self) -> usize {
        self.population_size
            .saturating_mul(self.attempts_per_individual)
    }

    /// Draws genomes until `population_size` of them fit the cycle, evaluating
    /// each accepted one. Unsatisfiable shapes fail before any draw is made.
    #[instrument(level = "debug", skip(self, rng, morphology, evaluator), fields(population_size = self.population_size, max_attempts = self.max_attempts()))]
    pub(crate) fn distribute<R: Rng, E: Evaluator + ?Sized>(
        &self,
        rng: &mut R,
        morphology: &Morphology,
        evaluator: &CountingEvaluator<'_, E>,
    ) -> Result<Population, InitializationError> {
        if !morphology.is_satisfiable() {
            tracing::error!(
                min_green_sum = morphology.min_green_sum(),
                cycle_time = morphology.cycle_time(),
                "no timing can fit the cycle"
            );
            return Err(InitializationError::CycleTooShort {
                min_green_sum: morphology.min_green_sum(),
                cycle_time: morphology.cycle_time(),
            });
        }

        let max_attempts = self.max_attempts();
        let mut individuals = Vec::with_capacity(self.population_size);
        let mut attempts = 0;

        while individuals.len() < self.population_size {
            if attempts >= max_attempts {
                tracing::error!(
                    attempts,
                    accepted = individuals.len(),
                    "initial population draw exhausted"
                );
                return Err(InitializationError::AttemptsExhausted {
                    attempts,
                    accepted: individuals.len(),
                    required: self.population_size,
                });
            }
            attempts += 1;

            let genome = morphology.random(rng);
            if morphology.is_feasible(&genome) {
                individuals.push(evaluator.assess(genome));
            }
        }

        tracing::debug!(attempts, "initial population drawn");

        Ok(Population::from_unsorted(individuals))
    }
}
