//! Constraint-violation fitness for timetable chromosomes.
//!
//! # Scoring
//!
//! ```text
//! penalty     = conflicts + unassigned * UNASSIGNED_WEIGHT
//! max_penalty = total * (total - 1) / 2 + total
//! fitness     = max(0, (1 - penalty / max_penalty) * 100)
//! ```
//!
//! A conflict is an unordered pair of fully assigned genes that overlap in
//! time and share an instructor, a room or a section. Overlap is half-open:
//! sessions that merely touch do not overlap. A chromosome with no genes
//! scores 0.
//!
//! The score is normalized, not an optimality measure: different penalty
//! profiles can map to the same fitness.

use std::collections::HashMap;

use crate::catalog::{ClockTime, InstructorId, RoomId, SectionId, SlotId, TimeSlot, Weekday};

use super::chromosome::{Assignment, TimeAssignment, TimetableChromosome};
use super::requirement::ClassRequirement;

/// Penalty of one unassigned requirement, in units of one pairwise conflict.
pub const UNASSIGNED_WEIGHT: u64 = 10;

/// Breakdown of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessReport {
    /// Number of genes (requirements).
    pub total: usize,
    /// Genes missing a field or referring to an unknown slot.
    pub unassigned: usize,
    /// Conflicting pairs among the fully assigned genes.
    pub conflicts: usize,
    pub penalty: u64,
    pub max_penalty: u64,
    pub fitness: f64,
}

/// One conflicting pair and the resources it shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Conflict {
    /// Gene index of the earlier requirement.
    pub first: usize,
    /// Gene index of the later requirement.
    pub second: usize,
    pub instructor: bool,
    pub room: bool,
    pub section: bool,
}

/// The day and `[start, end)` interval a session occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    day: Weekday,
    start: ClockTime,
    end: ClockTime,
}

impl Span {
    fn overlaps(&self, other: &Span) -> bool {
        self.day == other.day && self.start.max(other.start) < self.end.min(other.end)
    }
}

/// A fully assigned gene resolved against the slot table.
#[derive(Debug, Clone, Copy)]
struct Placed {
    index: usize,
    instructor: InstructorId,
    room: RoomId,
    section: SectionId,
    span: Span,
}

/// Scores chromosomes for one run.
///
/// Holds the per-gene sections and a slot lookup so evaluation never touches
/// the catalog. Shared read-only across threads during parallel evaluation.
#[derive(Debug, Clone, Default)]
pub struct FitnessEvaluator {
    sections: Vec<SectionId>,
    slots: HashMap<SlotId, TimeSlot>,
}

impl FitnessEvaluator {
    pub fn new(requirements: &[ClassRequirement], time_slots: &[TimeSlot]) -> Self {
        Self {
            sections: requirements.iter().map(|r| r.section).collect(),
            slots: time_slots.iter().map(|s| (s.id, *s)).collect(),
        }
    }

    /// Fitness in `[0, 100]`.
    pub fn fitness(&self, chromosome: &TimetableChromosome) -> f64 {
        self.report(chromosome).fitness
    }

    /// Full scoring breakdown.
    pub fn report(&self, chromosome: &TimetableChromosome) -> FitnessReport {
        let total = chromosome.len();
        let placed = self.placed(chromosome);
        let unassigned = total - placed.len();

        let mut conflicts = 0usize;
        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                if clash(a, b).is_some() {
                    conflicts += 1;
                }
            }
        }

        score(total, unassigned, conflicts)
    }

    /// Every conflicting pair, ordered by gene index.
    pub fn conflicts(&self, chromosome: &TimetableChromosome) -> Vec<Conflict> {
        let placed = self.placed(chromosome);
        let mut found = Vec::new();
        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                if let Some(conflict) = clash(a, b) {
                    found.push(conflict);
                }
            }
        }
        found
    }

    fn placed(&self, chromosome: &TimetableChromosome) -> Vec<Placed> {
        chromosome
            .genes
            .iter()
            .enumerate()
            .filter_map(|(index, gene)| self.place(index, gene))
            .collect()
    }

    fn place(&self, index: usize, gene: &Assignment) -> Option<Placed> {
        let instructor = gene.instructor?;
        let room = gene.room?;
        let span = self.span(gene.time?)?;
        let section = *self.sections.get(index)?;
        Some(Placed {
            index,
            instructor,
            room,
            section,
            span,
        })
    }

    fn span(&self, time: TimeAssignment) -> Option<Span> {
        match time {
            TimeAssignment::Single(id) => {
                let slot = self.slots.get(&id)?;
                Some(Span {
                    day: slot.day,
                    start: slot.start,
                    end: slot.end,
                })
            }
            TimeAssignment::Consecutive(a, b) => {
                let (a, b) = (self.slots.get(&a)?, self.slots.get(&b)?);
                Some(Span {
                    day: a.day,
                    start: a.start.min(b.start),
                    end: a.end.max(b.end),
                })
            }
        }
    }
}

fn clash(a: &Placed, b: &Placed) -> Option<Conflict> {
    if !a.span.overlaps(&b.span) {
        return None;
    }
    let conflict = Conflict {
        first: a.index,
        second: b.index,
        instructor: a.instructor == b.instructor,
        room: a.room == b.room,
        section: a.section == b.section,
    };
    (conflict.instructor || conflict.room || conflict.section).then_some(conflict)
}

/// Applies the normalized penalty formula.
pub fn score(total: usize, unassigned: usize, conflicts: usize) -> FitnessReport {
    let t = total as u64;
    let penalty = conflicts as u64 + unassigned as u64 * UNASSIGNED_WEIGHT;
    let max_penalty = t * t.saturating_sub(1) / 2 + t;
    let fitness = if max_penalty == 0 {
        0.0
    } else {
        ((1.0 - penalty as f64 / max_penalty as f64) * 100.0).max(0.0)
    };
    FitnessReport {
        total,
        unassigned,
        conflicts,
        penalty,
        max_penalty,
        fitness,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CourseId;

    fn slots() -> Vec<TimeSlot> {
        let mk = |id: u32, day: Weekday, h: u8, m: u8, eh: u8, em: u8| {
            TimeSlot::new(SlotId(id), day, ClockTime::hm(h, m), ClockTime::hm(eh, em)).unwrap()
        };
        vec![
            mk(1, Weekday::Monday, 9, 0, 10, 0),
            mk(2, Weekday::Monday, 10, 0, 11, 0),
            mk(3, Weekday::Monday, 11, 0, 12, 0),
            mk(4, Weekday::Tuesday, 9, 0, 10, 0),
            mk(5, Weekday::Monday, 9, 30, 10, 30),
        ]
    }

    fn requirements(sections: &[u32]) -> Vec<ClassRequirement> {
        sections
            .iter()
            .enumerate()
            .map(|(i, &s)| ClassRequirement {
                id: format!("S{s}_C_{i}"),
                section: SectionId(s),
                course: CourseId(1),
                session: i as u32,
                duration: 1,
            })
            .collect()
    }

    fn gene(instructor: u32, room: u32, time: TimeAssignment) -> Assignment {
        Assignment {
            instructor: Some(InstructorId(instructor)),
            room: Some(RoomId(room)),
            time: Some(time),
        }
    }

    fn single(id: u32) -> TimeAssignment {
        TimeAssignment::Single(SlotId(id))
    }

    #[test]
    fn test_perfect_score() {
        let eval = FitnessEvaluator::new(&requirements(&[1, 1, 2]), &slots());
        let ch = TimetableChromosome::new(vec![
            gene(1, 1, single(1)),
            gene(1, 1, single(2)),
            gene(2, 2, single(1)),
        ]);
        let report = eval.report(&ch);
        assert_eq!(report.conflicts, 0);
        assert_eq!(report.unassigned, 0);
        assert_eq!(report.fitness, 100.0);
        assert!(eval.conflicts(&ch).is_empty());
    }

    #[test]
    fn test_empty_scores_zero() {
        let eval = FitnessEvaluator::new(&[], &slots());
        let report = eval.report(&TimetableChromosome::unassigned(0));
        assert_eq!(report.fitness, 0.0);
        assert_eq!(report.max_penalty, 0);
    }

    #[test]
    fn test_two_sections_sharing_everything() {
        let eval = FitnessEvaluator::new(&requirements(&[1, 2]), &slots());
        let ch = TimetableChromosome::new(vec![gene(1, 1, single(1)), gene(1, 1, single(1))]);
        let report = eval.report(&ch);
        assert_eq!(report.conflicts, 1);
        assert_eq!(report.penalty, 1);
        assert_eq!(report.max_penalty, 3);
        assert!((report.fitness - 200.0 / 3.0).abs() < 1e-9);

        let conflicts = eval.conflicts(&ch);
        assert_eq!(
            conflicts,
            vec![Conflict {
                first: 0,
                second: 1,
                instructor: true,
                room: true,
                section: false,
            }]
        );
    }

    #[test]
    fn test_each_shared_resource_conflicts() {
        let eval = FitnessEvaluator::new(&requirements(&[1, 2, 3, 3]), &slots());
        // 0/1 share an instructor, 1/2 share a room, 2/3 share a section;
        // 0/3 share nothing. All four overlap on Monday 9:00.
        let ch = TimetableChromosome::new(vec![
            gene(1, 1, single(1)),
            gene(1, 2, single(1)),
            gene(2, 2, single(5)),
            gene(3, 3, single(1)),
        ]);
        let found = eval.conflicts(&ch);
        let pairs: Vec<(usize, usize)> = found.iter().map(|c| (c.first, c.second)).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 3)]);
        assert!(found[0].instructor && !found[0].room);
        assert!(found[1].room && !found[1].instructor);
        assert!(found[2].section);
        assert_eq!(eval.report(&ch).conflicts, 3);
    }

    #[test]
    fn test_touching_and_other_day_do_not_overlap() {
        let eval = FitnessEvaluator::new(&requirements(&[1, 1, 1]), &slots());
        let ch = TimetableChromosome::new(vec![
            gene(1, 1, single(1)),
            gene(1, 1, single(2)),
            gene(1, 1, single(4)),
        ]);
        assert_eq!(eval.report(&ch).conflicts, 0);
    }

    #[test]
    fn test_consecutive_span() {
        let eval = FitnessEvaluator::new(&requirements(&[1, 1, 1]), &slots());
        // 9:00-11:00 against 10:00-11:00 overlaps; 11:00-12:00 only touches.
        let ch = TimetableChromosome::new(vec![
            gene(1, 1, TimeAssignment::Consecutive(SlotId(1), SlotId(2))),
            gene(2, 2, single(2)),
            gene(3, 3, single(3)),
        ]);
        let found = eval.conflicts(&ch);
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].first, found[0].second), (0, 1));
        assert!(found[0].section);
    }

    #[test]
    fn test_unassigned_penalty() {
        let eval = FitnessEvaluator::new(&requirements(&[1, 2, 3, 4]), &slots());
        let mut ch = TimetableChromosome::new(vec![
            gene(1, 1, single(1)),
            gene(2, 2, single(1)),
            gene(3, 3, single(1)),
            gene(4, 4, single(1)),
        ]);
        assert_eq!(eval.fitness(&ch), 100.0);

        ch.genes[2].room = None;
        let report = eval.report(&ch);
        assert_eq!(report.unassigned, 1);
        assert_eq!(report.penalty, 10);
        assert_eq!(report.max_penalty, 10);
        assert_eq!(report.fitness, 0.0);
    }

    #[test]
    fn test_clamped_at_zero() {
        let eval = FitnessEvaluator::new(&requirements(&[1, 2]), &slots());
        let ch = TimetableChromosome::unassigned(2);
        let report = eval.report(&ch);
        assert_eq!(report.penalty, 20);
        assert_eq!(report.fitness, 0.0);
    }

    #[test]
    fn test_unknown_slot_counts_as_unassigned() {
        let eval = FitnessEvaluator::new(&requirements(&[1, 2]), &slots());
        let ch = TimetableChromosome::new(vec![gene(1, 1, single(99)), gene(1, 1, single(1))]);
        let report = eval.report(&ch);
        assert_eq!(report.unassigned, 1);
        assert_eq!(report.conflicts, 0);
    }

    #[test]
    fn test_extra_conflict_lowers_fitness() {
        let eval = FitnessEvaluator::new(&requirements(&[1, 2, 3]), &slots());
        let clean = TimetableChromosome::new(vec![
            gene(1, 1, single(1)),
            gene(2, 2, single(1)),
            gene(3, 3, single(1)),
        ]);
        let mut clashing = clean.clone();
        clashing.genes[2].instructor = Some(InstructorId(1));
        assert!(eval.fitness(&clashing) < eval.fitness(&clean));
    }

    #[test]
    fn test_score_formula() {
        let r = score(5, 1, 2);
        assert_eq!(r.penalty, 12);
        assert_eq!(r.max_penalty, 15);
        assert!((r.fitness - 20.0).abs() < 1e-9);
    }
}
