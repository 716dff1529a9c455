//! Candidate pools for instructor, room and time draws.
//!
//! Each field is drawn from an ordered list of pools: the first non-empty
//! pool wins and is sampled uniformly; if every pool is empty the field
//! stays unset.
//!
//! | Field      | Primary pool                                    | Fallback            |
//! |------------|-------------------------------------------------|---------------------|
//! | Instructor | instructors listed on the course                | available instructors |
//! | Room       | Lab rooms (Lab course) / rooms ≥ max enrollment | available rooms     |
//! | Time       | non-break slots (1) / consecutive pairs (2)     | none                |
//!
//! All pools are derived once per run from the snapshot.

use std::collections::HashMap;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::catalog::{
    CatalogSnapshot, Course, CourseId, CourseType, InstructorId, Room, RoomId, RoomType, SlotId,
};

use super::chromosome::TimeAssignment;
use super::requirement::ClassRequirement;
use super::slots::{find_consecutive_slots, LunchWindow};

/// Draws uniformly from the first non-empty pool.
pub fn pick_first<T: Copy, R: Rng>(pools: &[&[T]], rng: &mut R) -> Option<T> {
    pools
        .iter()
        .find(|pool| !pool.is_empty())
        .and_then(|pool| pool.choose(rng))
        .copied()
}

/// Per-run candidate pools.
#[derive(Debug, Clone, Default)]
pub struct CandidatePools {
    instructors: Vec<InstructorId>,
    rooms: Vec<RoomId>,
    single_slots: Vec<SlotId>,
    consecutive_slots: Vec<(SlotId, SlotId)>,
    course_instructors: HashMap<CourseId, Vec<InstructorId>>,
    course_rooms: HashMap<CourseId, Vec<RoomId>>,
}

impl CandidatePools {
    pub fn new(snapshot: &CatalogSnapshot, lunch: LunchWindow) -> Self {
        let course_instructors = snapshot
            .courses
            .iter()
            .map(|c| (c.id, c.instructors.clone()))
            .collect();
        let course_rooms = snapshot
            .courses
            .iter()
            .map(|c| (c.id, suitable_rooms(c, &snapshot.rooms)))
            .collect();

        Self {
            instructors: snapshot.instructors.iter().map(|i| i.id).collect(),
            rooms: snapshot.rooms.iter().map(|r| r.id).collect(),
            single_slots: snapshot
                .time_slots
                .iter()
                .filter(|s| !s.is_break)
                .map(|s| s.id)
                .collect(),
            consecutive_slots: find_consecutive_slots(&snapshot.time_slots, lunch),
            course_instructors,
            course_rooms,
        }
    }

    /// Instructor pools for `course`, in priority order.
    pub fn instructor_tiers(&self, course: CourseId) -> [&[InstructorId]; 2] {
        [
            self.course_instructors.get(&course).map_or(&[][..], Vec::as_slice),
            &self.instructors,
        ]
    }

    /// Room pools for `course`, in priority order.
    pub fn room_tiers(&self, course: CourseId) -> [&[RoomId]; 2] {
        [
            self.course_rooms.get(&course).map_or(&[][..], Vec::as_slice),
            &self.rooms,
        ]
    }

    pub fn single_slots(&self) -> &[SlotId] {
        &self.single_slots
    }

    pub fn consecutive_slots(&self) -> &[(SlotId, SlotId)] {
        &self.consecutive_slots
    }

    pub fn draw_instructor<R: Rng>(
        &self,
        requirement: &ClassRequirement,
        rng: &mut R,
    ) -> Option<InstructorId> {
        pick_first(&self.instructor_tiers(requirement.course), rng)
    }

    pub fn draw_room<R: Rng>(&self, requirement: &ClassRequirement, rng: &mut R) -> Option<RoomId> {
        pick_first(&self.room_tiers(requirement.course), rng)
    }

    pub fn draw_time<R: Rng>(
        &self,
        requirement: &ClassRequirement,
        rng: &mut R,
    ) -> Option<TimeAssignment> {
        if requirement.needs_consecutive() {
            pick_first(&[self.consecutive_slots.as_slice()], rng)
                .map(|(a, b)| TimeAssignment::Consecutive(a, b))
        } else {
            pick_first(&[self.single_slots.as_slice()], rng).map(TimeAssignment::Single)
        }
    }
}

/// Rooms fit for a course: Lab rooms for Lab courses, otherwise rooms that
/// seat the course's maximum enrollment.
fn suitable_rooms(course: &Course, rooms: &[Room]) -> Vec<RoomId> {
    rooms
        .iter()
        .filter(|r| match course.course_type {
            CourseType::Lab => r.room_type == RoomType::Lab,
            CourseType::Theory | CourseType::Practical => r.capacity >= course.max_students,
        })
        .map(|r| r.id)
        .collect()
}
