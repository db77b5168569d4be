use super::{
    Congestion, Distribution, GeneBoundError, GeneBounds, Morphology, Mutagen, ParameterError,
    Parameters, Schedule, Selector,
};
use chrono::{DateTime, Utc};
use tracing::instrument;
use uuid::Uuid;

/// One optimization run: validated parameters plus the traffic it is run on.
#[derive(Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct Request {
    pub(crate) id: Uuid,
    pub(crate) requested_at: DateTime<Utc>,
    pub(crate) parameters: Parameters,
    pub(crate) cars: Vec<u32>,
    pub(crate) capacity: Vec<u32>,
    pub(crate) schedule: Schedule,
}

impl Request {
    /// Creates a new optimization request, rejecting parameters and lane
    /// inputs that are meaningless.
    #[instrument(level = "debug", fields(cars = ?cars, capacity = ?capacity), skip(parameters, schedule))]
    pub(crate) fn new(
        parameters: Parameters,
        schedule: Schedule,
        cars: &[u32],
        capacity: &[u32],
    ) -> Result<Self, ParameterError> {
        parameters.validate()?;
        parameters.check_lanes("cars", cars)?;
        parameters.check_lanes("capacity", capacity)?;
        if let Some(lane) = capacity.iter().position(|&capacity| capacity == 0) {
            return Err(ParameterError::ZeroCapacity { lane });
        }

        Ok(Self {
            id: Uuid::now_v7(),
            requested_at: Utc::now(),
            parameters,
            cars: cars.to_vec(),
            capacity: capacity.to_vec(),
            schedule,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub(crate) fn congestion(&self) -> Congestion {
        Congestion::new(&self.cars, &self.capacity)
    }

    /// Fails when `green_min > green_max`, which leaves no admissible timing.
    pub(crate) fn morphology(&self) -> Result<Morphology, GeneBoundError> {
        let bounds = GeneBounds::new(self.parameters.green_min, self.parameters.green_max)?;
        Ok(Morphology::new(
            bounds,
            self.parameters.num_lights,
            self.parameters.cycle_time,
        ))
    }

    pub(crate) fn mutagen(&self) -> Result<Mutagen, ParameterError> {
        Ok(Mutagen::new(self.parameters.mutation_rate)?)
    }

    pub(crate) fn selector(&self) -> Selector {
        Selector::boltzmann(self.parameters.beta)
    }

    pub(crate) fn distribution(&self) -> Distribution {
        Distribution::random(self.parameters.population_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_request(cars: &[u32], capacity: &[u32]) -> Result<Request, ParameterError> {
        Request::new(
            Parameters::default(),
            Schedule::generational(25),
            cars,
            capacity,
        )
    }

    #[test]
    fn test_request_creation() {
        let request = create_test_request(&[5, 5, 5, 5], &[20, 20, 20, 20]).unwrap();

        assert!(!request.id.is_nil());
        assert!(request.requested_at <= Utc::now());
        assert_eq!(request.congestion().saturation(), &[0.75; 4]);
    }

    #[test]
    fn test_lane_inputs_are_checked() {
        assert!(matches!(
            create_test_request(&[5, 5, 5], &[20, 20, 20, 20]),
            Err(ParameterError::LengthMismatch { name: "cars", .. })
        ));
        assert!(matches!(
            create_test_request(&[5, 5, 5, 5], &[20, 20]),
            Err(ParameterError::LengthMismatch {
                name: "capacity",
                ..
            })
        ));
        assert!(matches!(
            create_test_request(&[5, 5, 5, 5], &[20, 0, 20, 20]),
            Err(ParameterError::ZeroCapacity { lane: 1 })
        ));
    }

    #[test]
    fn test_inverted_bounds_have_no_morphology() {
        let request = Request::new(
            Parameters {
                green_min: 80,
                ..Default::default()
            },
            Schedule::generational(25),
            &[5, 5, 5, 5],
            &[20, 20, 20, 20],
        )
        .unwrap();

        assert!(request.morphology().is_err());
    }
}
