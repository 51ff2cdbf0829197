//! Record parsing: extracted rows → typed course records.
//!
//! Columns are matched by position, not by header name:
//!
//! | document | 0 | 1 | 2 | 3 | 4 | 5 |
//! |----------|---|---|---|---|---|---|
//! | faculty  | code | title | day | time | hall | lecturer |
//! | Form B   | code | title | status | | | |
//!
//! Rows that are too short or lack the required fields are skipped without
//! error. Header rows are parsed like data rows. A faculty header only
//! matches when the Form B header carries the same first-column label
//! (e.g. both say `Course Code`); the resulting entry has day `Day` and
//! time `Time`, so it counts as matched but is never placed on the grid.

use crate::output::{CourseEntry, RawRow, RegistrationEntry};
use crate::pipeline::normalize::{clean_text, normalize_day, normalize_time};
use tracing::debug;

/// Minimum cells a faculty row needs.
pub const FACULTY_COLUMNS: usize = 6;

/// Minimum cells a Form B row needs.
pub const FORM_B_COLUMNS: usize = 3;

/// Parse faculty timetable rows into course entries.
///
/// Rows with fewer than six cells, or with an empty code, day or time after
/// normalisation, are skipped. Cells beyond the sixth are ignored.
pub fn parse_faculty_rows(rows: &[RawRow]) -> Vec<CourseEntry> {
    let entries: Vec<CourseEntry> = rows.iter().filter_map(|row| parse_faculty_row(row)).collect();
    debug!(
        "faculty: {} of {} rows parsed into course entries",
        entries.len(),
        rows.len()
    );
    entries
}

fn parse_faculty_row(row: &[String]) -> Option<CourseEntry> {
    if row.len() < FACULTY_COLUMNS {
        return None;
    }
    let entry = CourseEntry {
        course_code: clean_text(&row[0]),
        course_title: clean_text(&row[1]),
        day: normalize_day(&row[2]),
        time: normalize_time(&row[3]),
        hall: clean_text(&row[4]),
        lecturer: clean_text(&row[5]),
    };
    if entry.course_code.is_empty() || entry.day.is_empty() || entry.time.is_empty() {
        return None;
    }
    Some(entry)
}

/// Parse Form B rows into registration entries.
///
/// Rows with fewer than three cells or an empty course code are skipped.
pub fn parse_registration_rows(rows: &[RawRow]) -> Vec<RegistrationEntry> {
    let entries: Vec<RegistrationEntry> = rows
        .iter()
        .filter(|row| row.len() >= FORM_B_COLUMNS)
        .map(|row| RegistrationEntry {
            course_code: clean_text(&row[0]),
            course_title: clean_text(&row[1]),
            status: clean_text(&row[2]),
        })
        .filter(|entry| !entry.course_code.is_empty())
        .collect();
    debug!(
        "Form B: {} of {} rows parsed into registrations",
        entries.len(),
        rows.len()
    );
    entries
}
