//! Genetic algorithm engine.
//!
//! A generic, problem-agnostic GA built on trait-based abstractions.
//! Problems plug in by implementing [`GaProblem`], which specifies how to
//! create, evaluate, recombine and mutate individuals.
//!
//! # Core Traits
//!
//! - [`Individual`]: a candidate solution carrying its fitness
//! - [`GaProblem`]: initialization, evaluation, operators, feasibility
//!
//! # Key Types
//!
//! - [`GaConfig`]: population size, rates, caps and seed
//! - [`GaRunner`]: executes the generational loop
//! - [`GaResult`]: best individual, [`Termination`] reason and history
//!
//! # Submodules
//!
//! - [`operators`]: single-point crossover for positional gene vectors
//! - [`selection`]: tournament selection and mating pools
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
pub mod operators;
mod runner;
pub mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner, GenerationStats, Termination};
pub use types::{GaProblem, Individual};
