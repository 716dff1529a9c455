//! Generic positional crossover.
//!
//! Works on any gene vector whose positions have a fixed meaning for the
//! whole run, which is what makes a positional splice meaningful.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

use rand::Rng;

/// Single-point crossover.
///
/// Draws a cut point uniformly from `1..len` and returns
/// `p1[..cut] + p2[cut..]` and `p2[..cut] + p1[cut..]`.
///
/// Parents of different length, or shorter than two genes, are returned
/// unchanged: the very same vectors come back and no random number is
/// drawn.
///
/// # Complexity
/// O(n) time, no allocation
pub fn single_point_crossover<G, R: Rng>(
    parent1: Vec<G>,
    parent2: Vec<G>,
    rng: &mut R,
) -> (Vec<G>, Vec<G>) {
    if parent1.len() != parent2.len() || parent1.len() < 2 {
        return (parent1, parent2);
    }
    let cut = rng.random_range(1..parent1.len());
    splice_at(parent1, parent2, cut)
}

/// Exchanges the tails of two equal-length gene vectors starting at `cut`.
///
/// # Panics
/// Panics if the parents differ in length or `cut > len`.
pub fn splice_at<G>(mut parent1: Vec<G>, mut parent2: Vec<G>, cut: usize) -> (Vec<G>, Vec<G>) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    parent1[cut..].swap_with_slice(&mut parent2[cut..]);
    (parent1, parent2)
}
