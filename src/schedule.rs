//! The weekly grid: fixed days, fixed two-hour slots, ordered cells.
//!
//! [`ScheduleGrid`] always holds every (day, slot) pair. Cells are lists,
//! not strings: when two courses land in the same slot both are kept, in
//! the order they were placed, and it is up to the renderer to decide how
//! they are separated on the page.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Teaching days shown on the grid, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    /// All grid days, in display order.
    pub const ALL: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Canonical name, e.g. `"Monday"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        }
    }

    /// Exact lookup by canonical name. Aliases such as `"Mon"` are not
    /// accepted here; run them through
    /// [`normalize_day`](crate::pipeline::normalize::normalize_day) first.
    pub fn from_name(name: &str) -> Option<Day> {
        Day::ALL.into_iter().find(|d| d.as_str() == name)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six canonical two-hour teaching slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "07:00-09:00")]
    Early,
    #[serde(rename = "09:00-11:00")]
    Morning,
    #[serde(rename = "11:00-13:00")]
    Midday,
    #[serde(rename = "13:00-15:00")]
    Afternoon,
    #[serde(rename = "15:00-17:00")]
    LateAfternoon,
    #[serde(rename = "17:00-19:00")]
    Evening,
}

impl TimeSlot {
    /// All slots, earliest first.
    pub const ALL: [TimeSlot; 6] = [
        TimeSlot::Early,
        TimeSlot::Morning,
        TimeSlot::Midday,
        TimeSlot::Afternoon,
        TimeSlot::LateAfternoon,
        TimeSlot::Evening,
    ];

    /// Canonical `HH:MM-HH:MM` form.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeSlot::Early => "07:00-09:00",
            TimeSlot::Morning => "09:00-11:00",
            TimeSlot::Midday => "11:00-13:00",
            TimeSlot::Afternoon => "13:00-15:00",
            TimeSlot::LateAfternoon => "15:00-17:00",
            TimeSlot::Evening => "17:00-19:00",
        }
    }

    /// Exact lookup by canonical range. `"07:00-09:30"` or `"7-9"` return
    /// `None`: only already-normalised, slot-aligned ranges are placeable.
    pub fn from_range(range: &str) -> Option<TimeSlot> {
        TimeSlot::ALL.into_iter().find(|s| s.as_str() == range)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One course block inside a grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDisplay {
    pub course_code: String,
    pub course_title: String,
    pub hall: String,
}

type GridCells = BTreeMap<Day, BTreeMap<TimeSlot, Vec<CourseDisplay>>>;

/// Day → slot → ordered course blocks, always fully populated.
///
/// Serialises as `{"Monday": {"07:00-09:00": [...], ...}, ...}`. When
/// deserialising, missing days or slots are filled with empty cells, so a
/// grid read back from JSON still covers all 36 cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GridCells", into = "GridCells")]
pub struct ScheduleGrid {
    cells: GridCells,
}

impl Default for ScheduleGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleGrid {
    /// A grid with every (day, slot) cell present and empty.
    pub fn new() -> Self {
        let cells = Day::ALL
            .into_iter()
            .map(|day| {
                let slots = TimeSlot::ALL
                    .into_iter()
                    .map(|slot| (slot, Vec::new()))
                    .collect();
                (day, slots)
            })
            .collect();
        Self { cells }
    }

    /// Course blocks in one cell, in placement order.
    pub fn cell(&self, day: Day, slot: TimeSlot) -> &[CourseDisplay] {
        self.cells
            .get(&day)
            .and_then(|slots| slots.get(&slot))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Append a block to a cell. Earlier blocks are never overwritten.
    pub fn push(&mut self, day: Day, slot: TimeSlot, course: CourseDisplay) {
        self.cells
            .entry(day)
            .or_default()
            .entry(slot)
            .or_default()
            .push(course);
    }

    /// Iterate every cell in display order: Monday's six slots first, then
    /// Tuesday's, and so on.
    pub fn iter(&self) -> impl Iterator<Item = (Day, TimeSlot, &[CourseDisplay])> + '_ {
        self.cells.iter().flat_map(|(day, slots)| {
            slots
                .iter()
                .map(move |(slot, blocks)| (*day, *slot, blocks.as_slice()))
        })
    }

    /// Total number of placed course blocks.
    pub fn course_count(&self) -> usize {
        self.iter().map(|(_, _, blocks)| blocks.len()).sum()
    }

    /// `true` when no course has been placed.
    pub fn is_empty(&self) -> bool {
        self.course_count() == 0
    }
}

impl From<GridCells> for ScheduleGrid {
    fn from(cells: GridCells) -> Self {
        let mut grid = ScheduleGrid::new();
        for (day, slots) in cells {
            for (slot, blocks) in slots {
                for block in blocks {
                    grid.push(day, slot, block);
                }
            }
        }
        grid
    }
}

impl From<ScheduleGrid> for GridCells {
    fn from(grid: ScheduleGrid) -> Self {
        grid.cells
    }
}
