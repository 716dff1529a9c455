//! Expansion of a snapshot into schedulable class requirements.

use crate::catalog::{CatalogSnapshot, CourseId, SectionId};

/// One weekly session of one course for one section.
///
/// Requirements are created unassigned; their position in the requirement
/// list is the gene position in every chromosome of the run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassRequirement {
    /// Stable textual id: `{section_code}_{course_code}_{session}`.
    pub id: String,
    pub section: SectionId,
    pub course: CourseId,
    /// Zero-based index among the course's weekly sessions.
    pub session: u32,
    /// Slot units: 2 requires a consecutive pair, anything else one slot.
    pub duration: u8,
}

impl ClassRequirement {
    /// Returns `true` if the session occupies two back-to-back slots.
    pub fn needs_consecutive(&self) -> bool {
        self.duration == 2
    }
}

/// Expands every section × course × weekly session into a requirement.
///
/// Order follows the snapshot: sections in order, each section's courses in
/// order, sessions ascending. An empty result means nothing to schedule.
pub fn generate_requirements(snapshot: &CatalogSnapshot) -> Vec<ClassRequirement> {
    let mut requirements = Vec::new();
    for entry in &snapshot.sections {
        let section = &entry.section;
        for course_id in &entry.courses {
            let Some(course) = snapshot.course(*course_id) else {
                continue;
            };
            for session in 0..course.sessions_per_week {
                requirements.push(ClassRequirement {
                    id: format!("{}_{}_{}", section.code, course.code, session),
                    section: section.id,
                    course: course.id,
                    session,
                    duration: course.duration,
                });
            }
        }
    }
    requirements
}
