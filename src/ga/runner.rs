//! GA generational loop.
//!
//! [`GaRunner`] drives the whole run:
//! initialization → evaluation → termination check → selection →
//! elitism → crossover/mutation → replacement → evaluation → ...

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::config::GaConfig;
use super::selection::mating_pool;
use super::types::{GaProblem, Individual};
use crate::error::ConfigError;

/// Why a run stopped.
///
/// Every variant comes with the same result shape: the best individual
/// seen so far and its fitness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// The best individual reached the target fitness and is feasible.
    Converged,
    /// No strict improvement for `stagnation_limit` generations.
    Stalled,
    /// The generation cap was reached.
    Exhausted,
    /// The cancellation flag was raised.
    Cancelled,
    /// The wall-clock limit elapsed.
    TimeLimit,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Termination::Converged => "converged",
            Termination::Stalled => "stalled",
            Termination::Exhausted => "exhausted",
            Termination::Cancelled => "cancelled",
            Termination::TimeLimit => "time limit",
        };
        f.write_str(s)
    }
}

/// Fitness summary of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Zero-based generation index.
    pub generation: usize,
    pub best: f64,
    pub mean: f64,
    pub worst: f64,
}

impl GenerationStats {
    fn of<I: Individual>(generation: usize, population: &[I]) -> Self {
        let mut best = f64::NEG_INFINITY;
        let mut worst = f64::INFINITY;
        let mut sum = 0.0;
        for ind in population {
            let f = ind.fitness();
            best = best.max(f);
            worst = worst.min(f);
            sum += f;
        }
        Self {
            generation,
            best,
            mean: sum / population.len() as f64,
            worst,
        }
    }
}

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual seen during the run.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Number of generations evaluated, including the initial one.
    pub generations: usize,

    pub termination: Termination,

    /// Retained best fitness after each evaluated generation.
    pub fitness_history: Vec<f64>,

    /// Per-generation population statistics.
    pub generation_stats: Vec<GenerationStats>,
}

/// Executes the GA generational loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("best fitness {} ({})", result.best_fitness, result.termination);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA.
    ///
    /// Fails only on an invalid configuration.
    pub fn run<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
    ) -> Result<GaResult<P::Individual>, ConfigError> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is raised, the run stops before building the next
    /// generation and returns the best individual found so far. The
    /// initial generation is always evaluated.
    #[tracing::instrument(
        level = "debug",
        name = "GA",
        skip_all,
        fields(
            population = config.population_size,
            max_generations = config.max_generations
        )
    )]
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<P::Individual>, ConfigError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let started = Instant::now();
        let time_limit = config.time_limit_ms.map(Duration::from_millis);
        let elite_count = config.elite_count().min(config.population_size);

        // 1. Initialize and evaluate the first generation
        let mut population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();
        evaluate_population(problem, &mut population, config.parallel);

        // 2. Track best
        let mut best = population[best_index(&population)].clone();
        // The retained best starts from zero: a generation 0 that scores
        // nothing above it is already a stall.
        let mut stagnation_counter = usize::from(best.fitness() <= 0.0);
        let mut generations = 1usize;

        let mut fitness_history = Vec::with_capacity(config.max_generations.min(1024));
        let mut generation_stats = Vec::with_capacity(config.max_generations.min(1024));
        fitness_history.push(best.fitness());
        generation_stats.push(GenerationStats::of(0, &population));
        problem.on_generation(0, best.fitness());

        // 3. Generational loop
        let termination = loop {
            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                break Termination::Stalled;
            }
            if best.fitness() >= config.target_fitness && problem.is_feasible(&best) {
                break Termination::Converged;
            }
            if generations >= config.max_generations {
                break Termination::Exhausted;
            }
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                break Termination::Cancelled;
            }
            if time_limit.is_some_and(|limit| started.elapsed() >= limit) {
                break Termination::TimeLimit;
            }

            // Selection
            let pool = mating_pool(&population, config.tournament_size, &mut rng);

            // Elite preservation
            let mut next_gen: Vec<P::Individual> = elite_indices(&population, elite_count)
                .into_iter()
                .map(|i| population[i].clone())
                .collect();

            // Offspring
            while next_gen.len() < config.population_size {
                let parent1 = pool[rng.random_range(0..pool.len())].clone();
                let parent2 = pool[rng.random_range(0..pool.len())].clone();

                let (mut child1, mut child2) = problem.crossover(parent1, parent2, &mut rng);
                for child in [&mut child1, &mut child2] {
                    if rng.random::<f64>() < config.mutation_rate {
                        problem.mutate(child, &mut rng);
                    }
                }

                next_gen.push(child1);
                next_gen.push(child2);
            }
            next_gen.truncate(config.population_size);

            // Elites keep their fitness; only offspring need scoring.
            evaluate_population(problem, &mut next_gen[elite_count..], config.parallel);
            population = next_gen;

            // Update best
            let generation = generations;
            generations += 1;

            let gen_best = &population[best_index(&population)];
            if gen_best.fitness() > best.fitness() {
                best = gen_best.clone();
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }

            fitness_history.push(best.fitness());
            generation_stats.push(GenerationStats::of(generation, &population));
            problem.on_generation(generation, best.fitness());

            tracing::debug!(
                generation,
                best = best.fitness(),
                generation_best = gen_best.fitness(),
                stagnation = stagnation_counter,
                "GA: generation evaluated"
            );
        };

        tracing::info!(
            %termination,
            generations,
            best_fitness = best.fitness(),
            "GA: run finished"
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations,
            termination,
            fitness_history,
            generation_stats,
        })
    }
}

/// Evaluate all individuals in the slice.
#[cfg(feature = "parallel")]
fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    parallel: bool,
) {
    use rayon::prelude::*;

    if parallel {
        population.par_iter_mut().for_each(|ind| {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        });
    } else {
        evaluate_sequential(problem, population);
    }
}

/// Evaluate all individuals in the slice.
#[cfg(not(feature = "parallel"))]
fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    _parallel: bool,
) {
    evaluate_sequential(problem, population);
}

fn evaluate_sequential<P: GaProblem>(problem: &P, population: &mut [P::Individual]) {
    for ind in population.iter_mut() {
        let f = problem.evaluate(ind);
        ind.set_fitness(f);
    }
}

/// Index of the first individual with the highest fitness.
///
/// The population is never empty: `population_size >= 1` is validated.
fn best_index<I: Individual>(population: &[I]) -> usize {
    let mut best = 0;
    for (i, ind) in population.iter().enumerate().skip(1) {
        if ind.fitness() > population[best].fitness() {
            best = i;
        }
    }
    best
}

/// Indices of the `count` fittest individuals, best first.
///
/// Stable: equal fitness keeps population order.
fn elite_indices<I: Individual>(population: &[I], count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..population.len()).collect();
    order.sort_by(|&a, &b| {
        population[b]
            .fitness()
            .partial_cmp(&population[a].fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order.truncate(count);
    order
}

// ============================================================================
// Tests
// ============================================================================
