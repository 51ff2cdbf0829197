//! Records produced by the pipeline and the payload handed back to callers.

use crate::schedule::{CourseDisplay, ScheduleGrid};
use serde::{Deserialize, Serialize};

/// One extracted table row: cleaned cell texts, left to right.
pub type RawRow = Vec<String>;

/// A scheduled course occurrence from the faculty timetable.
///
/// `day` and `time` hold normalised strings. They are usually a canonical
/// day name and an `HH:MM-HH:MM` range, but the normaliser passes unknown
/// input through, so they are not guaranteed to be placeable on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseEntry {
    pub course_code: String,
    pub course_title: String,
    pub day: String,
    pub time: String,
    pub hall: String,
    pub lecturer: String,
}

impl CourseEntry {
    /// The block shown in a grid cell for this course.
    pub fn display(&self) -> CourseDisplay {
        CourseDisplay {
            course_code: self.course_code.clone(),
            course_title: self.course_title.clone(),
            hall: self.hall.clone(),
        }
    }
}

/// A course the student is registered for, read from Form B.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationEntry {
    pub course_code: String,
    pub course_title: String,
    pub status: String,
}

/// Result of a timetable request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableOutput {
    /// The personalised weekly grid.
    pub timetable: ScheduleGrid,
    /// Every registration read from Form B.
    pub student_courses: Vec<RegistrationEntry>,
    /// Faculty entries for the student's courses, before grid placement.
    pub filtered_courses: Vec<CourseEntry>,
}

impl TimetableOutput {
    /// Summary counts for this output.
    pub fn stats(&self, total_duration_ms: u64) -> TimetableStats {
        let placed = self.timetable.course_count();
        TimetableStats {
            student_courses: self.student_courses.len(),
            filtered_courses: self.filtered_courses.len(),
            placed_courses: placed,
            unplaced_courses: self.filtered_courses.len().saturating_sub(placed),
            total_duration_ms,
        }
    }
}

/// Counts reported after a timetable has been generated and written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableStats {
    /// Registrations found on Form B.
    pub student_courses: usize,
    /// Faculty entries matching a registration.
    pub filtered_courses: usize,
    /// Matched entries placed on the grid.
    pub placed_courses: usize,
    /// Matched entries dropped because their day or time is off-grid.
    pub unplaced_courses: usize,
    /// Wall-clock time for the whole request.
    pub total_duration_ms: u64,
}
