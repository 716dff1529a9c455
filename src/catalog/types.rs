//! Catalog entities.
//!
//! Entities are immutable for the duration of a run and reference each
//! other by id. Each id is a distinct newtype so an instructor id can never
//! be passed where a room id is expected.

use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

entity_id!(
    /// Department identifier.
    DepartmentId
);
entity_id!(
    /// Instructor identifier.
    InstructorId
);
entity_id!(
    /// Room identifier.
    RoomId
);
entity_id!(
    /// Time slot identifier.
    SlotId
);
entity_id!(
    /// Course identifier.
    CourseId
);
entity_id!(
    /// Section identifier.
    SectionId
);

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Department {
    pub id: DepartmentId,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instructor {
    pub id: InstructorId,
    pub name: String,
    pub is_available: bool,
}

impl Instructor {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: InstructorId(id),
            name: name.into(),
            is_available: true,
        }
    }

    pub fn unavailable(mut self) -> Self {
        self.is_available = false;
        self
    }
}

/// Room category. Only `Lab` is significant to room suitability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoomType {
    #[default]
    Classroom,
    Lab,
    Hall,
    Seminar,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    pub id: RoomId,
    pub number: String,
    pub capacity: u32,
    pub room_type: RoomType,
    pub is_available: bool,
}

impl Room {
    pub fn new(id: u32, number: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: RoomId(id),
            number: number.into(),
            capacity,
            room_type: RoomType::Classroom,
            is_available: true,
        }
    }

    pub fn with_type(mut self, room_type: RoomType) -> Self {
        self.room_type = room_type;
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.is_available = false;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CourseType {
    #[default]
    Theory,
    Lab,
    Practical,
}

/// A course and its weekly teaching load.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Course {
    pub id: CourseId,
    pub code: String,
    pub name: String,
    pub course_type: CourseType,
    /// Slot units per session: 1 for a single slot, 2 for two contiguous
    /// slots on the same day.
    pub duration: u8,
    pub max_students: u32,
    pub sessions_per_week: u32,
    /// Instructors qualified to teach the course, in catalog order.
    pub instructors: Vec<InstructorId>,
    /// Sections taking the course.
    pub sections: Vec<SectionId>,
}

impl Course {
    /// Creates a one-slot theory course for 60 students, three sessions a week.
    pub fn new(id: u32, code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            id: CourseId(id),
            name: code.clone(),
            code,
            course_type: CourseType::Theory,
            duration: 1,
            max_students: 60,
            sessions_per_week: 3,
            instructors: Vec::new(),
            sections: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_type(mut self, course_type: CourseType) -> Self {
        self.course_type = course_type;
        self
    }

    pub fn with_duration(mut self, duration: u8) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_max_students(mut self, max_students: u32) -> Self {
        self.max_students = max_students;
        self
    }

    pub fn with_sessions_per_week(mut self, sessions: u32) -> Self {
        self.sessions_per_week = sessions;
        self
    }

    pub fn with_instructors(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.instructors = ids.into_iter().map(InstructorId).collect();
        self
    }

    pub fn with_sections(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.sections = ids.into_iter().map(SectionId).collect();
        self
    }
}

/// A cohort of students that attends its courses together.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    pub id: SectionId,
    pub code: String,
    pub department: DepartmentId,
    pub year: u8,
    pub semester: u8,
    pub students: u32,
}

impl Section {
    pub fn new(id: u32, code: impl Into<String>, department: u32, year: u8, semester: u8) -> Self {
        Self {
            id: SectionId(id),
            code: code.into(),
            department: DepartmentId(department),
            year,
            semester,
            students: 60,
        }
    }

    pub fn with_students(mut self, students: u32) -> Self {
        self.students = students;
        self
    }
}
