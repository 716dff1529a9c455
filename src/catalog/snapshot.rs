//! In-memory catalog store and the read-only snapshot handed to a run.

use std::collections::HashSet;

use crate::error::CatalogError;

use super::time::TimeSlot;
use super::types::{Course, CourseId, Department, DepartmentId, Instructor, Room, Section};

/// Selects the sections a run schedules.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogFilter {
    pub departments: Vec<DepartmentId>,
    pub years: Vec<u8>,
    pub semester: u8,
}

impl CatalogFilter {
    pub fn new(
        departments: impl IntoIterator<Item = u32>,
        years: impl IntoIterator<Item = u8>,
        semester: u8,
    ) -> Self {
        Self {
            departments: departments.into_iter().map(DepartmentId).collect(),
            years: years.into_iter().collect(),
            semester,
        }
    }

    /// Returns `true` if the section belongs to one of the departments and
    /// years and to the semester.
    pub fn matches(&self, section: &Section) -> bool {
        section.semester == self.semester
            && self.departments.contains(&section.department)
            && self.years.contains(&section.year)
    }
}

/// The full catalog as owned by the external store.
///
/// Entities are kept in insertion order; that order is the "catalog
/// iteration order" the requirement generator relies on.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    pub departments: Vec<Department>,
    pub instructors: Vec<Instructor>,
    pub rooms: Vec<Room>,
    pub time_slots: Vec<TimeSlot>,
    pub courses: Vec<Course>,
    pub sections: Vec<Section>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_department(mut self, id: u32, code: impl Into<String>) -> Self {
        let code = code.into();
        self.departments.push(Department {
            id: DepartmentId(id),
            name: code.clone(),
            code,
        });
        self
    }

    pub fn with_instructor(mut self, instructor: Instructor) -> Self {
        self.instructors.push(instructor);
        self
    }

    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    pub fn with_time_slot(mut self, slot: TimeSlot) -> Self {
        self.time_slots.push(slot);
        self
    }

    pub fn with_time_slots(mut self, slots: impl IntoIterator<Item = TimeSlot>) -> Self {
        self.time_slots.extend(slots);
        self
    }

    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Checks ids, references, slot intervals and course durations.
    pub fn validate(&self) -> Result<(), CatalogError> {
        unique("department", self.departments.iter().map(|d| d.id.0))?;
        unique("instructor", self.instructors.iter().map(|i| i.id.0))?;
        unique("room", self.rooms.iter().map(|r| r.id.0))?;
        unique("time slot", self.time_slots.iter().map(|s| s.id.0))?;
        unique("course", self.courses.iter().map(|c| c.id.0))?;
        unique("section", self.sections.iter().map(|s| s.id.0))?;

        for slot in &self.time_slots {
            slot.check()?;
        }

        let departments: HashSet<_> = self.departments.iter().map(|d| d.id).collect();
        for section in &self.sections {
            if !departments.contains(&section.department) {
                return Err(CatalogError::UnknownReference {
                    owner_kind: "section",
                    owner: section.id.0,
                    kind: "department",
                    id: section.department.0,
                });
            }
        }

        let instructors: HashSet<_> = self.instructors.iter().map(|i| i.id).collect();
        let sections: HashSet<_> = self.sections.iter().map(|s| s.id).collect();
        for course in &self.courses {
            if !(1..=2).contains(&course.duration) {
                return Err(CatalogError::UnsupportedDuration {
                    course: course.id.0,
                    duration: course.duration,
                });
            }
            if let Some(missing) = course.instructors.iter().find(|i| !instructors.contains(*i)) {
                return Err(CatalogError::UnknownReference {
                    owner_kind: "course",
                    owner: course.id.0,
                    kind: "instructor",
                    id: missing.0,
                });
            }
            if let Some(missing) = course.sections.iter().find(|s| !sections.contains(*s)) {
                return Err(CatalogError::UnknownReference {
                    owner_kind: "course",
                    owner: course.id.0,
                    kind: "section",
                    id: missing.0,
                });
            }
        }

        Ok(())
    }

    /// Builds the read-only view for one run.
    ///
    /// Instructors and rooms are restricted to available ones, break slots
    /// are dropped and the rest sorted by day then start time, and sections
    /// are those matching `filter`, in catalog order.
    pub fn snapshot(&self, filter: &CatalogFilter) -> CatalogSnapshot {
        let instructors = self
            .instructors
            .iter()
            .filter(|i| i.is_available)
            .cloned()
            .collect();
        let rooms = self.rooms.iter().filter(|r| r.is_available).cloned().collect();

        let mut time_slots: Vec<TimeSlot> =
            self.time_slots.iter().filter(|s| !s.is_break).copied().collect();
        time_slots.sort_by_key(|s| (s.day, s.start));

        let mut sections = Vec::new();
        let mut used_courses = HashSet::new();
        for section in self.sections.iter().filter(|s| filter.matches(s)) {
            let courses: Vec<CourseId> = self
                .courses
                .iter()
                .filter(|c| c.sections.contains(&section.id))
                .map(|c| c.id)
                .collect();
            used_courses.extend(courses.iter().copied());
            sections.push(SectionCourses {
                section: section.clone(),
                courses,
            });
        }

        let courses = self
            .courses
            .iter()
            .filter(|c| used_courses.contains(&c.id))
            .cloned()
            .collect();

        CatalogSnapshot {
            instructors,
            rooms,
            time_slots,
            courses,
            sections,
        }
    }
}

fn unique(kind: &'static str, ids: impl Iterator<Item = u32>) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId { kind, id });
        }
    }
    Ok(())
}

/// A section together with the courses it takes, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionCourses {
    pub section: Section,
    pub courses: Vec<CourseId>,
}

/// Read-only scheduling universe for a single run.
///
/// Either built by [`Catalog::snapshot`] or supplied directly by an
/// external store that already applied the same filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogSnapshot {
    /// Available instructors.
    pub instructors: Vec<Instructor>,
    /// Available rooms.
    pub rooms: Vec<Room>,
    /// Non-break slots sorted by day, then start time.
    pub time_slots: Vec<TimeSlot>,
    /// Every course referenced by `sections`.
    pub courses: Vec<Course>,
    pub sections: Vec<SectionCourses>,
}

impl CatalogSnapshot {
    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Returns `true` if no section matched the filter.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ClockTime, InstructorId, SlotId, Weekday};

    fn slot(id: u32, day: Weekday, start: u8) -> TimeSlot {
        TimeSlot::new(
            SlotId(id),
            day,
            ClockTime::hm(start, 0),
            ClockTime::hm(start + 1, 0),
        )
        .unwrap()
    }

    fn sample_catalog() -> Catalog {
        Catalog::new()
            .with_department(1, "CSE")
            .with_department(2, "ECE")
            .with_instructor(Instructor::new(1, "Ada"))
            .with_instructor(Instructor::new(2, "Brian").unavailable())
            .with_room(Room::new(1, "R-101", 60))
            .with_room(Room::new(2, "R-102", 60).unavailable())
            .with_time_slot(slot(3, Weekday::Tuesday, 9))
            .with_time_slot(slot(2, Weekday::Monday, 10))
            .with_time_slot(slot(1, Weekday::Monday, 9))
            .with_time_slot(slot(4, Weekday::Monday, 13).as_break())
            .with_section(Section::new(10, "CSE-1A", 1, 1, 1))
            .with_section(Section::new(11, "CSE-2A", 1, 2, 1))
            .with_section(Section::new(12, "ECE-1A", 2, 1, 1))
            .with_section(Section::new(13, "CSE-1B", 1, 1, 2))
            .with_course(Course::new(100, "CS101").with_instructors([1]).with_sections([10, 13]))
            .with_course(Course::new(101, "CS102").with_sections([10, 11]))
            .with_course(Course::new(102, "EC101").with_sections([12]))
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample_catalog().validate().is_ok());
    }

    #[test]
    fn test_validate_duplicate() {
        let catalog = sample_catalog().with_room(Room::new(1, "R-dup", 10));
        assert_eq!(
            catalog.validate(),
            Err(CatalogError::DuplicateId { kind: "room", id: 1 })
        );
    }

    #[test]
    fn test_validate_unknown_reference() {
        let catalog = sample_catalog().with_course(Course::new(103, "X").with_instructors([99]));
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::UnknownReference { kind: "instructor", id: 99, .. })
        ));

        let catalog = sample_catalog().with_section(Section::new(14, "ME-1A", 7, 1, 1));
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::UnknownReference { kind: "department", id: 7, .. })
        ));
    }

    #[test]
    fn test_validate_duration() {
        let catalog = sample_catalog().with_course(Course::new(104, "Y").with_duration(3));
        assert_eq!(
            catalog.validate(),
            Err(CatalogError::UnsupportedDuration { course: 104, duration: 3 })
        );
    }

    #[test]
    fn test_validate_inverted_slot() {
        let mut catalog = sample_catalog();
        catalog.time_slots[0].end = ClockTime::hm(8, 0);
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::InvertedTimeSlot { slot: 3, .. })
        ));
    }

    #[test]
    fn test_snapshot_filters_and_sorts() {
        let catalog = sample_catalog();
        let snapshot = catalog.snapshot(&CatalogFilter::new([1], [1, 2], 1));

        assert_eq!(snapshot.instructors.len(), 1);
        assert_eq!(snapshot.instructors[0].id, InstructorId(1));
        assert_eq!(snapshot.rooms.len(), 1);

        let slot_ids: Vec<u32> = snapshot.time_slots.iter().map(|s| s.id.0).collect();
        assert_eq!(slot_ids, vec![1, 2, 3]);

        let section_ids: Vec<u32> = snapshot.sections.iter().map(|s| s.section.id.0).collect();
        assert_eq!(section_ids, vec![10, 11]);
        assert_eq!(
            snapshot.sections[0].courses,
            vec![CourseId(100), CourseId(101)]
        );
        assert_eq!(snapshot.sections[1].courses, vec![CourseId(101)]);

        assert_eq!(snapshot.courses.len(), 2);
        assert!(snapshot.course(CourseId(102)).is_none());
        assert_eq!(snapshot.sections[1].section.year, 2);
    }

    #[test]
    fn test_snapshot_no_match() {
        let snapshot = sample_catalog().snapshot(&CatalogFilter::new([1], [4], 1));
        assert!(snapshot.is_empty());
        assert!(snapshot.courses.is_empty());
        assert_eq!(snapshot.time_slots.len(), 3);
    }
}
