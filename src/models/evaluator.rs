use super::{Evaluation, Gene, Individual};
use std::cell::Cell;

/// Objective function returning the total delay of a candidate timing.
/// Lower is better. Implementations must not fail; degenerate inputs should be
/// scored with a penalty instead.
pub trait Evaluator {
    fn evaluate(&self, genes: &[Gene]) -> Evaluation;
}

/// Wraps an evaluator and counts how many evaluations were performed.
pub(crate) struct CountingEvaluator<'a, E: ?Sized> {
    inner: &'a E,
    count: Cell<u64>,
}

impl<'a, E: Evaluator + ?Sized> CountingEvaluator<'a, E> {
    pub(crate) fn new(inner: &'a E) -> Self {
        Self {
            inner,
            count: Cell::new(0),
        }
    }

    pub(crate) fn count(&self) -> u64 {
        self.count.get()
    }

    /// Evaluates `genes` and takes ownership of them as a new individual.
    pub(crate) fn assess(&self, genes: Vec<Gene>) -> Individual {
        let evaluation = self.evaluate(&genes);
        Individual::new(genes, evaluation)
    }
}

impl<E: Evaluator + ?Sized> Evaluator for CountingEvaluator<'_, E> {
    fn evaluate(&self, genes: &[Gene]) -> Evaluation {
        self.count.set(self.count.get() + 1);
        self.inner.evaluate(genes)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Sum of squared green times, for tests that need a predictable landscape.
    pub(crate) struct SquaredSum;

    impl Evaluator for SquaredSum {
        fn evaluate(&self, genes: &[Gene]) -> Evaluation {
            Evaluation {
                total_delay: genes.iter().map(|&g| (g * g) as f64).sum(),
                penalized_lanes: 0,
            }
        }
    }

    #[test]
    fn it_counts_evaluations() {
        let evaluator = CountingEvaluator::new(&SquaredSum);

        let individual = evaluator.assess(vec![1, 2, 3]);
        evaluator.evaluate(&[4]);

        assert_eq!(individual.total_delay(), 14.0);
        assert_eq!(individual.genes(), &[1, 2, 3]);
        assert_eq!(evaluator.count(), 2);
    }
}
