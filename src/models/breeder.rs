use crate::models::evaluator::CountingEvaluator;
use crate::models::{
    Evaluator, Gene, Individual, Morphology, Mutagen, Population, Selector, crossover, invert,
};
use rand::Rng;
use tracing::instrument;

/// Default number of breeding rounds allowed per requested offspring.
pub const DEFAULT_REFILL_ATTEMPTS: usize = 20;

/// Produces the offspring of one generation.
pub(crate) struct Breeder<'a> {
    morphology: &'a Morphology,
    selector: Selector,
    mutagen: &'a Mutagen,
    refill_attempts: usize,
}

impl<'a> Breeder<'a> {
    pub(crate) fn new(
        morphology: &'a Morphology,
        selector: Selector,
        mutagen: &'a Mutagen,
        refill_attempts: usize,
    ) -> Self {
        Self {
            morphology,
            selector,
            mutagen,
            refill_attempts: refill_attempts.max(1),
        }
    }

    /// Mutates and clips `genes`, then evaluates them if they still form a
    /// feasible timing.
    fn finish<R: Rng, E: Evaluator + ?Sized>(
        &self,
        rng: &mut R,
        genes: &[Gene],
        evaluator: &CountingEvaluator<'_, E>,
    ) -> Option<Individual> {
        let mutated = self
            .mutagen
            .mutate(rng, genes, self.morphology.bounds());
        let clipped = self.morphology.clip(mutated);

        self.morphology
            .is_feasible(&clipped)
            .then(|| evaluator.assess(clipped))
    }

    /// Breeds up to `target` feasible offspring from `population`.
    ///
    /// Parents are paired by the selector and recombined; children whose green
    /// sum exceeds the cycle are discarded. If crossover stalls for
    /// `target * refill_attempts` rounds, the remainder is topped up by
    /// inverting random members of `population`. Both phases are capped, so the
    /// result may be shorter than `target`.
    #[instrument(level = "debug", skip_all, fields(target = target, population_size = population.len()))]
    pub(crate) fn breed<R: Rng, E: Evaluator + ?Sized>(
        &self,
        rng: &mut R,
        population: &Population,
        target: usize,
        evaluator: &CountingEvaluator<'_, E>,
    ) -> Vec<Individual> {
        let mut offspring = Vec::with_capacity(target);
        if population.is_empty() {
            return offspring;
        }

        let individuals = population.individuals();
        let delays = population.delays();
        let max_rounds = target.saturating_mul(self.refill_attempts);

        let mut rounds = 0;
        while offspring.len() < target && rounds < max_rounds {
            rounds += 1;

            let lhs = &individuals[self.selector.select(rng, &delays)];
            let rhs = &individuals[self.selector.select(rng, &delays)];
            let (first, second) = crossover(rng, lhs.genes(), rhs.genes());

            for child in [first, second] {
                if offspring.len() >= target {
                    break;
                }
                if !self.morphology.fits_cycle(&child) {
                    continue;
                }
                if let Some(individual) = self.finish(rng, &child, evaluator) {
                    offspring.push(individual);
                }
            }
        }

        if offspring.len() < target {
            tracing::debug!(
                bred = offspring.len(),
                rounds,
                "crossover stalled, topping up by inversion"
            );
            self.top_up(rng, individuals, target, &mut offspring, evaluator);
        }

        offspring
    }

    fn top_up<R: Rng, E: Evaluator + ?Sized>(
        &self,
        rng: &mut R,
        individuals: &[Individual],
        target: usize,
        offspring: &mut Vec<Individual>,
        evaluator: &CountingEvaluator<'_, E>,
    ) {
        let max_attempts = target.saturating_mul(self.refill_attempts);

        let mut attempts = 0;
        while offspring.len() < target && attempts < max_attempts {
            attempts += 1;

            let source = &individuals[rng.random_range(0..individuals.len())];
            let inverted = invert(rng, source.genes());
            if let Some(individual) = self.finish(rng, &inverted, evaluator) {
                offspring.push(individual);
            }
        }

        if offspring.len() < target {
            tracing::warn!(
                bred = offspring.len(),
                target,
                "generation left short after inversion top-up"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluator::tests::SquaredSum;
    use crate::models::{Distribution, GeneBounds};
    use rand::{SeedableRng, rngs::StdRng};

    fn setup(cycle_time: Gene) -> (Morphology, Mutagen) {
        (
            Morphology::new(GeneBounds::new(10, 60).unwrap(), 4, cycle_time),
            Mutagen::new(0.5).unwrap(),
        )
    }

    #[test]
    fn it_breeds_a_full_feasible_generation() {
        let mut rng = StdRng::seed_from_u64(42);
        let (morphology, mutagen) = setup(148);
        let evaluator = CountingEvaluator::new(&SquaredSum);
        let population = Distribution::random(40)
            .distribute(&mut rng, &morphology, &evaluator)
            .unwrap();

        let breeder = Breeder::new(&morphology, Selector::boltzmann(8.0), &mutagen, 20);
        let offspring = breeder.breed(&mut rng, &population, 40, &evaluator);

        assert_eq!(offspring.len(), 40);
        assert!(offspring.iter().all(|i| morphology.is_feasible(i.genes())));
    }

    #[test]
    fn it_tops_up_by_inversion() {
        let mut rng = StdRng::seed_from_u64(42);
        let (morphology, _) = setup(148);
        let mutagen = Mutagen::new(0.0).unwrap();
        let evaluator = CountingEvaluator::new(&SquaredSum);
        let source = evaluator.assess(vec![10, 20, 30, 40]);

        let breeder = Breeder::new(&morphology, Selector::boltzmann(8.0), &mutagen, 1);
        let mut offspring = Vec::new();
        breeder.top_up(&mut rng, &[source], 5, &mut offspring, &evaluator);

        assert_eq!(offspring.len(), 5);
        for individual in &offspring {
            let mut genes = individual.genes().to_vec();
            genes.sort();
            assert_eq!(genes, vec![10, 20, 30, 40]);
        }
    }

    #[test]
    fn it_stops_at_the_attempt_cap() {
        let mut rng = StdRng::seed_from_u64(42);
        let (morphology, mutagen) = setup(40);
        let evaluator = CountingEvaluator::new(&SquaredSum);
        // no recombination, inversion or single step can bring this under 40
        let population = Population::from_unsorted(vec![evaluator.assess(vec![60, 60, 60, 60])]);

        let breeder = Breeder::new(&morphology, Selector::boltzmann(8.0), &mutagen, 3);
        let offspring = breeder.breed(&mut rng, &population, 10, &evaluator);

        assert!(offspring.is_empty());
        // the seed individual is the only evaluation
        assert_eq!(evaluator.count(), 1);
    }
}
