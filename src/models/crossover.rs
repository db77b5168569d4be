use crate::models::Gene;
use rand::Rng;
use tracing::instrument;

/// Swaps the tails of two genomes at `point`.
#[instrument(level = "trace", skip(lhs, rhs), fields(genome_length = lhs.len(), cut_point = point))]
fn crossover_single_point(lhs: &[Gene], rhs: &[Gene], point: usize) -> (Vec<Gene>, Vec<Gene>) {
    let mut first = Vec::with_capacity(lhs.len());
    first.extend_from_slice(&lhs[..point]); // Head from lhs
    first.extend_from_slice(&rhs[point..]); // Tail from rhs

    let mut second = Vec::with_capacity(rhs.len());
    second.extend_from_slice(&rhs[..point]);
    second.extend_from_slice(&lhs[point..]);

    (first, second)
}

/// Single-point crossover producing two children.
///
/// The cut point is drawn from `1..len` so both parents contribute to each
/// child. Genomes shorter than two genes cannot be cut and are returned as
/// clones of their parents. Parents are never modified.
pub fn crossover<R: Rng>(rng: &mut R, lhs: &[Gene], rhs: &[Gene]) -> (Vec<Gene>, Vec<Gene>) {
    debug_assert_eq!(lhs.len(), rhs.len());

    if lhs.len() < 2 {
        return (lhs.to_vec(), rhs.to_vec());
    }

    let point = rng.random_range(1..lhs.len());
    crossover_single_point(lhs, rhs, point)
}
