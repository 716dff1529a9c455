//! Core trait definitions for the GA engine.
//!
//! [`Individual`] and [`GaProblem`] are the contract between the generic
//! generational loop and a concrete problem such as timetabling.

use rand::Rng;

/// A candidate solution in the GA population.
///
/// Individuals carry their own fitness value. The runner calls
/// [`GaProblem::evaluate`] and stores the result via
/// [`set_fitness`](Individual::set_fitness).
///
/// Fitness is **maximized**: higher is better.
pub trait Individual: Clone + Send + Sync {
    /// Returns the last stored fitness.
    fn fitness(&self) -> f64;

    /// Stores a freshly computed fitness.
    fn set_fitness(&mut self, fitness: f64);
}

/// Defines a GA optimization problem.
///
/// Implementors provide:
///
/// 1. **Initialization**: how to create a random individual
/// 2. **Evaluation**: how to score it
/// 3. **Crossover**: how to recombine two parents into two children
/// 4. **Mutation**: how to perturb one individual
/// 5. **Feasibility**: what, besides fitness, convergence requires
///
/// Every stochastic hook receives the runner's random source, so a seeded
/// run is reproducible.
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the runner may evaluate
/// individuals in parallel.
pub trait GaProblem: Send + Sync {
    type Individual: Individual;

    /// Creates a random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Scores an individual. Must not depend on any other individual.
    fn evaluate(&self, individual: &Self::Individual) -> f64;

    /// Recombines two parents into two children.
    ///
    /// Parents are passed by value; an implementation that cannot recombine
    /// them returns them unchanged. The default does exactly that.
    fn crossover<R: Rng>(
        &self,
        parent1: Self::Individual,
        parent2: Self::Individual,
        _rng: &mut R,
    ) -> (Self::Individual, Self::Individual) {
        (parent1, parent2)
    }

    /// Mutates an individual in place.
    ///
    /// Called once per child with probability
    /// [`mutation_rate`](super::GaConfig::mutation_rate). The default is a
    /// no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}

    /// Returns `true` if the individual may end the run once its fitness
    /// reaches the target. The default accepts every individual.
    fn is_feasible(&self, _individual: &Self::Individual) -> bool {
        true
    }

    /// Called after each evaluated generation with the retained best fitness.
    fn on_generation(&self, _generation: usize, _best_fitness: f64) {}
}
