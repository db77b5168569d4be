use crate::models::{Gene, GeneBounds};
use rand::Rng;
use serde::Serialize;
use tracing::instrument;

/// Shape of a timing genome: how many lights, the bounds each green time must
/// respect and the cycle time the green times must fit into.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Morphology {
    pub(crate) bounds: GeneBounds,
    pub(crate) num_lights: usize,
    pub(crate) cycle_time: Gene,
}

impl Morphology {
    #[instrument(level = "debug", fields(lower = bounds.lower, upper = bounds.upper, num_lights = num_lights, cycle_time = cycle_time))]
    pub fn new(bounds: GeneBounds, num_lights: usize, cycle_time: Gene) -> Self {
        Self {
            bounds,
            num_lights,
            cycle_time,
        }
    }

    pub fn bounds(&self) -> &GeneBounds {
        &self.bounds
    }

    pub fn num_lights(&self) -> usize {
        self.num_lights
    }

    pub fn cycle_time(&self) -> Gene {
        self.cycle_time
    }

    /// Smallest possible green sum, `lower * num_lights`.
    pub fn min_green_sum(&self) -> Gene {
        self.bounds
            .lower
            .saturating_mul(Gene::try_from(self.num_lights).unwrap_or(Gene::MAX))
    }

    /// Whether any genome at all can fit into the cycle.
    pub fn is_satisfiable(&self) -> bool {
        self.min_green_sum() <= self.cycle_time
    }

    /// Correct length, every gene in bounds and the sum within the cycle.
    pub fn is_feasible(&self, genes: &[Gene]) -> bool {
        genes.len() == self.num_lights
            && genes.iter().all(|&gene| self.bounds.contains(gene))
            && self.fits_cycle(genes)
    }

    /// Whether the green sum fits into the cycle, ignoring per-gene bounds.
    /// A sum that overflows never fits.
    pub fn fits_cycle(&self, genes: &[Gene]) -> bool {
        checked_green_sum(genes).is_some_and(|sum| sum <= self.cycle_time)
    }

    pub fn clip(&self, mut genes: Vec<Gene>) -> Vec<Gene> {
        for gene in genes.iter_mut() {
            *gene = self.bounds.clamp(*gene);
        }
        genes
    }

    /// Draws each green time uniformly from the bounds. The result is not
    /// guaranteed to fit the cycle.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Vec<Gene> {
        (0..self.num_lights)
            .map(|_| self.bounds.random(rng))
            .collect()
    }
}

fn checked_green_sum(genes: &[Gene]) -> Option<Gene> {
    genes.iter().try_fold(0, |acc: Gene, &gene| acc.checked_add(gene))
}
