use super::Evaluation;
use serde::Serialize;

/// One direction's green time, in whole seconds.
pub type Gene = i64;

/// A candidate green-time assignment together with its evaluated delay.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Individual {
    pub(crate) genes: Vec<Gene>,
    pub(crate) total_delay: f64,
    pub(crate) penalized_lanes: usize,
}

impl Individual {
    pub(crate) fn new(genes: Vec<Gene>, evaluation: Evaluation) -> Self {
        Self {
            genes,
            total_delay: evaluation.total_delay,
            penalized_lanes: evaluation.penalized_lanes,
        }
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn total_delay(&self) -> f64 {
        self.total_delay
    }

    /// Whether at least one lane fell back to the penalty constant.
    pub fn is_penalized(&self) -> bool {
        self.penalized_lanes > 0
    }

    pub fn penalized_lanes(&self) -> usize {
        self.penalized_lanes
    }

    /// Saturates at [`Gene::MAX`].
    pub fn green_sum(&self) -> Gene {
        self.genes
            .iter()
            .fold(0, |acc: Gene, &gene| acc.saturating_add(gene))
    }
}
