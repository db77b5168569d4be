use crate::models::Gene;
use rand::Rng;

/// Returns a copy of `genes` with the segment between two random indices
/// (inclusive) reversed. Inversion permutes genes, so the green sum is kept.
pub fn invert<R: Rng>(rng: &mut R, genes: &[Gene]) -> Vec<Gene> {
    let mut inverted = genes.to_vec();
    if inverted.len() < 2 {
        return inverted;
    }

    let a = rng.random_range(0..inverted.len());
    let b = rng.random_range(0..inverted.len());
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

    inverted[lo..=hi].reverse();
    inverted
}
