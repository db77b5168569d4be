use serde::Serialize;
use tracing::instrument;

/// Per-lane saturation ratios and capacities for one optimization run.
///
/// `saturation_i = (capacity_i - cars_i) / capacity_i`. Built once when a run
/// starts and only read afterwards.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Congestion {
    saturation: Vec<f64>,
    capacity: Vec<f64>,
}

impl Congestion {
    /// Capacities must be non-zero; [`crate::models::Request`] checks this.
    #[instrument(level = "debug", fields(cars = ?cars, capacity = ?capacity))]
    pub(crate) fn new(cars: &[u32], capacity: &[u32]) -> Self {
        let (saturation, capacity) = cars
            .iter()
            .zip(capacity.iter())
            .map(|(&cars, &capacity)| {
                let capacity = f64::from(capacity);
                ((capacity - f64::from(cars)) / capacity, capacity)
            })
            .unzip();

        Self {
            saturation,
            capacity,
        }
    }

    pub fn saturation(&self) -> &[f64] {
        &self.saturation
    }

    pub fn capacity(&self) -> &[f64] {
        &self.capacity
    }

    /// `(saturation, capacity)` per lane, in direction order.
    pub(crate) fn lanes(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.saturation
            .iter()
            .copied()
            .zip(self.capacity.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.saturation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saturation.is_empty()
    }
}
