//! Timetabling as a [`GaProblem`].
//!
//! # Operators
//!
//! - **Initialization**: every gene draws instructor, room and time
//!   independently from its [`CandidatePools`].
//! - **Crossover**: single-point splice of the gene vectors.
//! - **Mutation**: one gene, one field, re-drawn with the same pools as
//!   initialization. If the pools for that field are empty, the field is
//!   left as it was.
//! - **Feasibility**: every gene fully assigned.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::catalog::CatalogSnapshot;
use crate::ga::operators::single_point_crossover;
use crate::ga::GaProblem;

use super::chromosome::{Assignment, GeneField, TimetableChromosome};
use super::fitness::{FitnessEvaluator, FitnessReport};
use super::pools::CandidatePools;
use super::requirement::{generate_requirements, ClassRequirement};
use super::slots::LunchWindow;

/// Timetable optimization problem for one snapshot.
///
/// Everything derived from the snapshot (requirements, pools, slot lookup)
/// is built once in [`new`](TimetableProblem::new) and read-only afterwards.
#[derive(Debug, Clone)]
pub struct TimetableProblem {
    requirements: Vec<ClassRequirement>,
    pools: CandidatePools,
    evaluator: FitnessEvaluator,
}

impl TimetableProblem {
    pub fn new(snapshot: &CatalogSnapshot, lunch: LunchWindow) -> Self {
        let requirements = generate_requirements(snapshot);
        let pools = CandidatePools::new(snapshot, lunch);
        let evaluator = FitnessEvaluator::new(&requirements, &snapshot.time_slots);
        Self {
            requirements,
            pools,
            evaluator,
        }
    }

    pub fn requirements(&self) -> &[ClassRequirement] {
        &self.requirements
    }

    pub fn pools(&self) -> &CandidatePools {
        &self.pools
    }

    pub fn report(&self, chromosome: &TimetableChromosome) -> FitnessReport {
        self.evaluator.report(chromosome)
    }

    /// Draws a fresh assignment for `requirement`.
    fn random_assignment<R: Rng>(&self, requirement: &ClassRequirement, rng: &mut R) -> Assignment {
        Assignment {
            instructor: self.pools.draw_instructor(requirement, rng),
            room: self.pools.draw_room(requirement, rng),
            time: self.pools.draw_time(requirement, rng),
        }
    }

    /// Re-draws one field of one gene.
    pub fn reroll<R: Rng>(
        &self,
        chromosome: &mut TimetableChromosome,
        index: usize,
        field: GeneField,
        rng: &mut R,
    ) {
        let (Some(requirement), Some(gene)) =
            (self.requirements.get(index), chromosome.genes.get_mut(index))
        else {
            return;
        };
        match field {
            GeneField::Instructor => {
                if let Some(instructor) = self.pools.draw_instructor(requirement, rng) {
                    gene.instructor = Some(instructor);
                }
            }
            GeneField::Room => {
                if let Some(room) = self.pools.draw_room(requirement, rng) {
                    gene.room = Some(room);
                }
            }
            GeneField::Time => {
                if let Some(time) = self.pools.draw_time(requirement, rng) {
                    gene.time = Some(time);
                }
            }
        }
    }
}

impl GaProblem for TimetableProblem {
    type Individual = TimetableChromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> TimetableChromosome {
        TimetableChromosome::new(
            self.requirements
                .iter()
                .map(|r| self.random_assignment(r, rng))
                .collect(),
        )
    }

    fn evaluate(&self, chromosome: &TimetableChromosome) -> f64 {
        self.evaluator.fitness(chromosome)
    }

    fn crossover<R: Rng>(
        &self,
        parent1: TimetableChromosome,
        parent2: TimetableChromosome,
        rng: &mut R,
    ) -> (TimetableChromosome, TimetableChromosome) {
        let (g1, g2) = single_point_crossover(parent1.genes, parent2.genes, rng);
        (TimetableChromosome::new(g1), TimetableChromosome::new(g2))
    }

    fn mutate<R: Rng>(&self, chromosome: &mut TimetableChromosome, rng: &mut R) {
        if chromosome.is_empty() {
            return;
        }
        let index = rng.random_range(0..chromosome.len());
        if let Some(&field) = GeneField::ALL.choose(rng) {
            self.reroll(chromosome, index, field, rng);
        }
    }

    fn is_feasible(&self, chromosome: &TimetableChromosome) -> bool {
        chromosome.is_fully_assigned()
    }

    fn on_generation(&self, generation: usize, best_fitness: f64) {
        tracing::trace!(
            generation,
            best_fitness,
            requirements = self.requirements.len(),
            "Timetable: generation scored"
        );
    }
}
