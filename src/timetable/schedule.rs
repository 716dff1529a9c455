//! Output boundary: placements and materialized timetable records.

use crate::catalog::{CourseId, InstructorId, RoomId, SectionId, SlotId};

use super::chromosome::{Assignment, TimeAssignment};
use super::requirement::ClassRequirement;

/// A requirement paired with the assignment the optimizer chose for it.
///
/// Unset fields mean the optimizer could not place the requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub requirement: ClassRequirement,
    pub assignment: Assignment,
}

/// One persisted class meeting in one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledClass {
    /// Requirement id, suffixed `_slot_{i}` for each slot of a two-slot session.
    pub id: String,
    pub section: SectionId,
    pub course: CourseId,
    pub instructor: InstructorId,
    pub room: RoomId,
    pub time_slot: SlotId,
}

/// A named set of class records ready for persistence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timetable {
    pub name: String,
    pub fitness: f64,
    pub classes: Vec<ScheduledClass>,
    /// Placements left out because a field was unset.
    pub skipped: usize,
    /// Set when `fitness` reached the activation threshold.
    pub is_active: bool,
}

impl Timetable {
    /// Builds class records from placements.
    ///
    /// Single-slot sessions yield one record with the requirement id;
    /// two-slot sessions yield one record per slot. Incomplete placements
    /// are skipped and counted.
    pub fn materialize(
        name: impl Into<String>,
        placements: &[Placement],
        fitness: f64,
        activation_threshold: f64,
    ) -> Self {
        let mut classes = Vec::with_capacity(placements.len());
        let mut skipped = 0;

        for placement in placements {
            let Assignment {
                instructor: Some(instructor),
                room: Some(room),
                time: Some(time),
            } = placement.assignment
            else {
                skipped += 1;
                continue;
            };
            let req = &placement.requirement;
            let record = |id: String, time_slot: SlotId| ScheduledClass {
                id,
                section: req.section,
                course: req.course,
                instructor,
                room,
                time_slot,
            };

            match time {
                TimeAssignment::Single(slot) => classes.push(record(req.id.clone(), slot)),
                TimeAssignment::Consecutive(..) => {
                    for (i, slot) in time.slots().into_iter().enumerate() {
                        classes.push(record(format!("{}_slot_{}", req.id, i), slot));
                    }
                }
            }
        }

        Self {
            name: name.into(),
            fitness,
            classes,
            skipped,
            is_active: fitness >= activation_threshold,
        }
    }
}
