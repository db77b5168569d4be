use super::{Error, Service};
use crate::models::{
    DEFAULT_ATTEMPTS_PER_INDIVIDUAL, DEFAULT_CAPACITY, DEFAULT_REFILL_ATTEMPTS, ParameterError,
    Parameters,
};
use std::time::Duration;
use tracing::instrument;

pub struct ServiceBuilder {
    pub(super) parameters: Parameters,
    pub(super) capacity: Option<Vec<u32>>,
    pub(super) time_budget: Option<Duration>,
    pub(super) attempts_per_individual: usize,
    pub(super) refill_attempts: usize,
}

impl Default for ServiceBuilder {
    fn default() -> Self {
        Self {
            parameters: Parameters::default(),
            capacity: None,
            time_budget: None,
            attempts_per_individual: DEFAULT_ATTEMPTS_PER_INDIVIDUAL,
            refill_attempts: DEFAULT_REFILL_ATTEMPTS,
        }
    }
}

impl ServiceBuilder {
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Lane capacities in direction order. Defaults to [`DEFAULT_CAPACITY`]
    /// for every light.
    pub fn with_capacity(mut self, capacity: Vec<u32>) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Wall-clock budget per run. The best timing found when it runs out is
    /// still returned.
    pub fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = Some(time_budget);
        self
    }

    pub fn with_attempts_per_individual(mut self, attempts: usize) -> Self {
        self.attempts_per_individual = attempts.max(1);
        self
    }

    pub fn with_refill_attempts(mut self, attempts: usize) -> Self {
        self.refill_attempts = attempts.max(1);
        self
    }

    #[instrument(level = "debug", skip(self), fields(parameters = ?self.parameters, capacity = ?self.capacity))]
    pub fn build(self) -> Result<Service, Error> {
        self.parameters.validate()?;

        let capacity = self
            .capacity
            .unwrap_or_else(|| vec![DEFAULT_CAPACITY; self.parameters.num_lights]);
        self.parameters.check_lanes("capacity", &capacity)?;
        if let Some(lane) = capacity.iter().position(|&capacity| capacity == 0) {
            return Err(ParameterError::ZeroCapacity { lane }.into());
        }

        Ok(Service {
            parameters: self.parameters,
            capacity,
            time_budget: self.time_budget,
            attempts_per_individual: self.attempts_per_individual,
            refill_attempts: self.refill_attempts,
        })
    }
}
