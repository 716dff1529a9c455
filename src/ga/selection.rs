//! Tournament selection.
//!
//! Each draw samples `min(k, n)` distinct entrants uniformly without
//! replacement and keeps the one with the highest fitness. Draws are
//! independent, so the same individual can win many times.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::seq::index;
use rand::Rng;

use super::types::Individual;

/// Runs one tournament over `fitness` and returns the winner's index.
///
/// Ties among the maximal entrants go to the lowest population index.
/// Higher `k` means stronger selection pressure.
///
/// # Panics
/// Panics if `fitness` is empty.
pub fn tournament<R: Rng>(fitness: &[f64], k: usize, rng: &mut R) -> usize {
    assert!(!fitness.is_empty(), "cannot select from empty population");

    let n = fitness.len();
    let k = k.clamp(1, n);

    let mut winner = usize::MAX;
    for idx in index::sample(rng, n, k).iter() {
        let better = winner == usize::MAX
            || fitness[idx] > fitness[winner]
            || (fitness[idx] == fitness[winner] && idx < winner);
        if better {
            winner = idx;
        }
    }
    winner
}

/// Fills a mating pool of `population.len()` independent copies, each the
/// winner of its own tournament.
pub fn mating_pool<I: Individual, R: Rng>(population: &[I], k: usize, rng: &mut R) -> Vec<I> {
    let fitness: Vec<f64> = population.iter().map(Individual::fitness).collect();
    (0..population.len())
        .map(|_| population[tournament(&fitness, k, rng)].clone())
        .collect()
}
