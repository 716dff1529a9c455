//! Academic timetabling on top of the [`ga`](crate::ga) engine.
//!
//! Assigns every weekly session of every selected course section an
//! instructor, a room and a time, avoiding overlaps that share any of
//! instructor, room or section.
//!
//! # Pipeline
//!
//! 1. [`generate_requirements`]: snapshot → ordered [`ClassRequirement`]s
//! 2. [`CandidatePools`]: per-field candidate pools with ordered fallbacks
//! 3. [`TimetableProblem`]: random initialization, crossover, mutation
//! 4. [`FitnessEvaluator`]: conflict and completeness scoring in `[0, 100]`
//! 5. [`Timetable::materialize`]: placements → class records
//!
//! [`TimetableScheduler`] runs the whole pipeline from a [`Catalog`](crate::catalog::Catalog)
//! and a [`RunRequest`].
//!
//! # References
//!
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"
//! - Colorni, Dorigo & Maniezzo (1998), "Metaheuristics for high school timetabling"

mod chromosome;
mod fitness;
mod pools;
mod problem;
mod requirement;
mod schedule;
mod scheduler;
mod slots;

pub use chromosome::{Assignment, GeneField, TimeAssignment, TimetableChromosome};
pub use fitness::{score, Conflict, FitnessEvaluator, FitnessReport, UNASSIGNED_WEIGHT};
pub use pools::{pick_first, CandidatePools};
pub use problem::TimetableProblem;
pub use requirement::{generate_requirements, ClassRequirement};
pub use schedule::{Placement, ScheduledClass, Timetable};
pub use scheduler::{RunRequest, TimetableConfig, TimetableOutcome, TimetableScheduler};
pub use slots::{find_consecutive_slots, LunchWindow};
