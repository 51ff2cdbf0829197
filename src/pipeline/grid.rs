//! Grid building: matched course entries → [`ScheduleGrid`].

use crate::output::CourseEntry;
use crate::schedule::{Day, ScheduleGrid, TimeSlot};
use tracing::debug;

/// Place each entry into its (day, slot) cell.
///
/// Entries whose day is not a grid day or whose time is not exactly one of
/// the canonical slots are dropped. Entries sharing a cell are kept in input
/// order.
pub fn build_grid(entries: &[CourseEntry]) -> ScheduleGrid {
    let mut grid = ScheduleGrid::new();

    for entry in entries {
        match (Day::from_name(&entry.day), TimeSlot::from_range(&entry.time)) {
            (Some(day), Some(slot)) => grid.push(day, slot, entry.display()),
            _ => debug!(
                "not placing {} ({} {}): off-grid day or time",
                entry.course_code, entry.day, entry.time
            ),
        }
    }

    grid
}
