//! Scheduling universe: departments, instructors, rooms, time slots,
//! courses and sections.
//!
//! The [`Catalog`] is the store-side view of all entities. A run never
//! sees it directly; it works on a [`CatalogSnapshot`] produced by
//! [`Catalog::snapshot`] for one [`CatalogFilter`], or supplied by an
//! external store that applies the same rules.

mod snapshot;
mod time;
mod types;

pub use snapshot::{Catalog, CatalogFilter, CatalogSnapshot, SectionCourses};
pub use time::{ClockTime, TimeSlot, Weekday};
pub use types::{
    Course, CourseId, CourseType, Department, DepartmentId, Instructor, InstructorId, Room,
    RoomId, RoomType, Section, SectionId, SlotId,
};
