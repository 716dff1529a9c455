//! Assignment genes and the timetable chromosome.
//!
//! # Encoding
//!
//! A chromosome is one [`Assignment`] per class requirement, in requirement
//! order. The order is fixed for the whole run, which is what single-point
//! crossover relies on. Each assignment field is optional: unset fields
//! mark a requirement the optimizer could not place.

use crate::catalog::{InstructorId, RoomId, SlotId};
use crate::ga::Individual;

/// When a session meets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeAssignment {
    /// A one-slot session.
    Single(SlotId),
    /// A two-slot session on two back-to-back slots of the same day.
    Consecutive(SlotId, SlotId),
}

impl TimeAssignment {
    /// The slot the session starts in.
    pub fn first(&self) -> SlotId {
        match *self {
            TimeAssignment::Single(slot) | TimeAssignment::Consecutive(slot, _) => slot,
        }
    }

    /// Every slot the session occupies, in order.
    pub fn slots(&self) -> Vec<SlotId> {
        match *self {
            TimeAssignment::Single(slot) => vec![slot],
            TimeAssignment::Consecutive(a, b) => vec![a, b],
        }
    }
}

/// Which part of an assignment a mutation re-rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneField {
    Instructor,
    Room,
    Time,
}

impl GeneField {
    pub const ALL: [GeneField; 3] = [GeneField::Instructor, GeneField::Room, GeneField::Time];
}

/// Instructor, room and time for one class requirement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub instructor: Option<InstructorId>,
    pub room: Option<RoomId>,
    pub time: Option<TimeAssignment>,
}

impl Assignment {
    /// Returns `true` if instructor, room and time are all set.
    pub fn is_complete(&self) -> bool {
        self.instructor.is_some() && self.room.is_some() && self.time.is_some()
    }
}

/// One candidate timetable.
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableChromosome {
    /// One gene per class requirement, in requirement order.
    pub genes: Vec<Assignment>,
    /// Fitness in `[0, 100]`, higher is better. Zero until evaluated.
    pub fitness: f64,
}

impl Individual for TimetableChromosome {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl TimetableChromosome {
    pub fn new(genes: Vec<Assignment>) -> Self {
        Self {
            genes,
            fitness: 0.0,
        }
    }

    /// A chromosome with every field of `len` genes unset.
    pub fn unassigned(len: usize) -> Self {
        Self::new(vec![Assignment::default(); len])
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Number of genes missing at least one field.
    pub fn unassigned_count(&self) -> usize {
        self.genes.iter().filter(|g| !g.is_complete()).count()
    }

    /// Returns `true` if every gene is complete.
    ///
    /// A chromosome without genes is trivially fully assigned.
    pub fn is_fully_assigned(&self) -> bool {
        self.genes.iter().all(Assignment::is_complete)
    }
}
