use super::Individual;
use serde::Serialize;

/// Individuals ordered ascending by total delay. The first member is the best.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    pub(crate) fn from_unsorted(mut individuals: Vec<Individual>) -> Self {
        sort_by_delay(&mut individuals);
        Self { individuals }
    }

    /// Adds `offspring`, re-sorts and keeps the best `size` individuals.
    pub(crate) fn merge(&mut self, offspring: Vec<Individual>, size: usize) {
        self.individuals.extend(offspring);
        sort_by_delay(&mut self.individuals);
        self.individuals.truncate(size);
    }

    pub fn best(&self) -> Option<&Individual> {
        self.individuals.first()
    }

    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn delays(&self) -> Vec<f64> {
        self.individuals.iter().map(Individual::total_delay).collect()
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn is_sorted(&self) -> bool {
        self.individuals
            .windows(2)
            .all(|pair| pair[0].total_delay <= pair[1].total_delay)
    }
}

// Stable, so equal delays keep their insertion order.
fn sort_by_delay(individuals: &mut [Individual]) {
    individuals.sort_by(|a, b| a.total_delay.total_cmp(&b.total_delay));
}
