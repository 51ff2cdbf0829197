//! Keep only the faculty entries for courses the student registered for.

use crate::output::{CourseEntry, RegistrationEntry};
use std::collections::HashSet;
use tracing::debug;

/// Return the faculty entries whose course code appears in `registrations`.
///
/// Faculty order is preserved and nothing is duplicated, even when a code is
/// registered twice. Registered codes with no faculty entry are ignored.
pub fn match_courses(
    faculty: &[CourseEntry],
    registrations: &[RegistrationEntry],
) -> Vec<CourseEntry> {
    let registered: HashSet<&str> = registrations
        .iter()
        .map(|r| r.course_code.as_str())
        .collect();

    let matched: Vec<CourseEntry> = faculty
        .iter()
        .filter(|entry| registered.contains(entry.course_code.as_str()))
        .cloned()
        .collect();

    debug!(
        "matched {} of {} faculty entries against {} registered codes",
        matched.len(),
        faculty.len(),
        registered.len()
    );
    matched
}
