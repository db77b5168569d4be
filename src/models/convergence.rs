use super::Individual;
use serde::Serialize;

/// Best individual seen so far and the best delay after every generation.
///
/// `history[0]` is the best delay of the initial population, `history[n]` the
/// best delay after generation `n`. The history never increases.
#[derive(Debug, Clone, Serialize)]
pub struct BestTracker {
    best: Individual,
    history: Vec<f64>,
}

impl BestTracker {
    pub(crate) fn new(initial: Individual) -> Self {
        let history = vec![initial.total_delay()];
        Self {
            best: initial,
            history,
        }
    }

    /// Replaces the tracked best if `candidate` is strictly better, then
    /// records the current best delay. Returns whether it was replaced.
    pub(crate) fn observe(&mut self, candidate: &Individual) -> bool {
        let improved = candidate.total_delay() < self.best.total_delay();
        if improved {
            self.best = candidate.clone();
        }

        self.history.push(self.best.total_delay());
        improved
    }

    pub fn best(&self) -> &Individual {
        &self.best
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub(crate) fn into_parts(self) -> (Individual, Vec<f64>) {
        (self.best, self.history)
    }
}
