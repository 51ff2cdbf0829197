//! Grid rendering: [`ScheduleGrid`] → document bytes.
//!
//! [`GridRenderer`] is the seam between the pipeline and the output format.
//! [`PdfiumRenderer`] draws a landscape A4 table with pdfium-render;
//! [`HtmlRenderer`](crate::pipeline::html::HtmlRenderer) emits a standalone
//! HTML page and needs no native library.
//!
//! The PDF layout is computed up front without touching pdfium: each slot
//! row is measured from its wrapped cell text, rows are split into pages,
//! and only then are the drawing calls issued. Rendering is synchronous and
//! CPU-bound; async callers run it inside `spawn_blocking`.

use crate::error::TimetableError;
use crate::schedule::{CourseDisplay, Day, ScheduleGrid, TimeSlot};
use pdfium_render::prelude::*;
use std::ops::Range;
use std::path::PathBuf;
use tracing::{debug, info};

/// Turns a grid into the bytes of a finished document.
pub trait GridRenderer: Send + Sync {
    fn render(&self, grid: &ScheduleGrid) -> Result<Vec<u8>, TimetableError>;
}

// ── Page geometry (PDF points, origin bottom-left) ───────────────────────────

const PAGE_WIDTH: f32 = 842.0;
const PAGE_HEIGHT: f32 = 595.0;
const MARGIN: f32 = 36.0;
const TITLE_SIZE: f32 = 16.0;
const HEADER_SIZE: f32 = 10.0;
const BODY_SIZE: f32 = 8.0;
const LINE_HEIGHT: f32 = 10.0;
const CELL_PADDING: f32 = 4.0;
const HEADER_ROW_HEIGHT: f32 = 22.0;
const MIN_ROW_HEIGHT: f32 = 30.0;
const SLOT_COLUMN_WIDTH: f32 = 80.0;
const DAY_COLUMN_WIDTH: f32 = (PAGE_WIDTH - 2.0 * MARGIN - SLOT_COLUMN_WIDTH) / 6.0;
const TABLE_TOP: f32 = PAGE_HEIGHT - MARGIN - TITLE_SIZE - 12.0;

/// Vertical space for slot rows on one page, below the header row.
const BODY_HEIGHT: f32 = TABLE_TOP - HEADER_ROW_HEIGHT - MARGIN;

/// Helvetica averages a little over half an em per glyph.
const AVG_CHAR_WIDTH: f32 = BODY_SIZE * 0.55;

/// Renders the grid to PDF through pdfium.
#[derive(Debug, Clone)]
pub struct PdfiumRenderer {
    title: String,
    lib_path: Option<PathBuf>,
}

impl PdfiumRenderer {
    /// `lib_path` may name the library file or the directory holding it.
    /// When `None`, `PDFIUM_LIB_PATH` is tried, then the system library.
    pub fn new(title: String, lib_path: Option<PathBuf>) -> Self {
        Self { title, lib_path }
    }

    fn bind(&self) -> Result<Pdfium, TimetableError> {
        let configured = self
            .lib_path
            .clone()
            .or_else(|| std::env::var_os("PDFIUM_LIB_PATH").map(PathBuf::from));

        let bindings = match configured {
            Some(path) => {
                let lib = if path.is_dir() {
                    PathBuf::from(Pdfium::pdfium_platform_library_name_at_path(&path))
                } else {
                    path
                };
                debug!("Binding pdfium from {}", lib.display());
                Pdfium::bind_to_library(&lib).map_err(|e| {
                    TimetableError::PdfiumBindingFailed(format!("{}: {:?}", lib.display(), e))
                })?
            }
            None => Pdfium::bind_to_system_library()
                .map_err(|e| TimetableError::PdfiumBindingFailed(format!("{:?}", e)))?,
        };

        Ok(Pdfium::new(bindings))
    }
}

impl GridRenderer for PdfiumRenderer {
    fn render(&self, grid: &ScheduleGrid) -> Result<Vec<u8>, TimetableError> {
        let rows = layout_rows(grid);
        let heights: Vec<f32> = rows.iter().map(|r| r.height).collect();
        let pages = paginate(&heights, BODY_HEIGHT);

        let pdfium = self.bind()?;
        let render_err = |e: PdfiumError| TimetableError::RenderFailed {
            detail: format!("{:?}", e),
        };

        let mut document = pdfium.create_new_pdf().map_err(render_err)?;
        let fonts = Fonts {
            regular: document.fonts_mut().helvetica(),
            bold: document.fonts_mut().helvetica_bold(),
        };

        for (index, range) in pages.iter().enumerate() {
            let mut page = document
                .pages_mut()
                .create_page_at_end(PdfPagePaperSize::Custom(
                    PdfPoints::new(PAGE_WIDTH),
                    PdfPoints::new(PAGE_HEIGHT),
                ))
                .map_err(render_err)?;

            let heading = if index == 0 {
                self.title.clone()
            } else {
                format!("{} (continued)", self.title)
            };
            draw_page(&mut page, &fonts, &heading, &rows[range.clone()]).map_err(render_err)?;
        }

        let bytes = document.save_to_bytes().map_err(render_err)?;
        info!(
            "Rendered {} course block(s) onto {} page(s), {} bytes",
            grid.course_count(),
            pages.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}

struct Fonts {
    regular: PdfFontToken,
    bold: PdfFontToken,
}

fn draw_page(
    page: &mut PdfPage,
    fonts: &Fonts,
    heading: &str,
    rows: &[SlotRow],
) -> Result<(), PdfiumError> {
    let grid_color = PdfColor::new(180, 180, 180, 255);
    let header_fill = PdfColor::new(200, 230, 201, 255);
    let separator_color = PdfColor::new(189, 195, 199, 255);
    let thin = PdfPoints::new(0.5);
    let objects = page.objects_mut();

    objects.create_text_object(
        PdfPoints::new(MARGIN),
        PdfPoints::new(PAGE_HEIGHT - MARGIN - TITLE_SIZE),
        heading,
        fonts.bold,
        PdfPoints::new(TITLE_SIZE),
    )?;

    // Header row.
    let header_bottom = TABLE_TOP - HEADER_ROW_HEIGHT;
    let text_y = header_bottom + (HEADER_ROW_HEIGHT - HEADER_SIZE) / 2.0;
    let columns = std::iter::once(("Time/Day", MARGIN, SLOT_COLUMN_WIDTH)).chain(
        Day::ALL
            .iter()
            .enumerate()
            .map(|(i, day)| (day.as_str(), column_left(i), DAY_COLUMN_WIDTH)),
    );
    for (label, left, width) in columns {
        objects.create_path_object_rect(
            PdfRect::new_from_values(header_bottom, left, TABLE_TOP, left + width),
            Some(grid_color),
            Some(thin),
            Some(header_fill),
        )?;
        objects.create_text_object(
            PdfPoints::new(left + CELL_PADDING),
            PdfPoints::new(text_y),
            label,
            fonts.bold,
            PdfPoints::new(HEADER_SIZE),
        )?;
    }

    // Slot rows.
    let mut top = header_bottom;
    for row in rows {
        let bottom = top - row.height;

        objects.create_path_object_rect(
            PdfRect::new_from_values(bottom, MARGIN, top, MARGIN + SLOT_COLUMN_WIDTH),
            Some(grid_color),
            Some(thin),
            None,
        )?;
        objects.create_text_object(
            PdfPoints::new(MARGIN + CELL_PADDING),
            PdfPoints::new(top - CELL_PADDING - BODY_SIZE),
            row.slot.as_str(),
            fonts.bold,
            PdfPoints::new(BODY_SIZE),
        )?;

        for (i, lines) in row.cells.iter().enumerate() {
            let left = column_left(i);
            objects.create_path_object_rect(
                PdfRect::new_from_values(bottom, left, top, left + DAY_COLUMN_WIDTH),
                Some(grid_color),
                Some(thin),
                None,
            )?;

            let mut baseline = top - CELL_PADDING - BODY_SIZE;
            for line in lines {
                match line {
                    CellLine::Code(text) | CellLine::Text(text) => {
                        let font = if matches!(line, CellLine::Code(_)) {
                            fonts.bold
                        } else {
                            fonts.regular
                        };
                        objects.create_text_object(
                            PdfPoints::new(left + CELL_PADDING),
                            PdfPoints::new(baseline),
                            text,
                            font,
                            PdfPoints::new(BODY_SIZE),
                        )?;
                    }
                    CellLine::Separator => {
                        let y = baseline + BODY_SIZE / 2.0;
                        objects.create_path_object_line(
                            PdfPoints::new(left + CELL_PADDING),
                            PdfPoints::new(y),
                            PdfPoints::new(left + DAY_COLUMN_WIDTH - CELL_PADDING),
                            PdfPoints::new(y),
                            separator_color,
                            thin,
                        )?;
                    }
                }
                baseline -= LINE_HEIGHT;
            }
        }

        top = bottom;
    }

    Ok(())
}

fn column_left(day_index: usize) -> f32 {
    MARGIN + SLOT_COLUMN_WIDTH + day_index as f32 * DAY_COLUMN_WIDTH
}

// ── Layout ───────────────────────────────────────────────────────────────────

/// One printed line inside a cell.
#[derive(Debug, Clone, PartialEq)]
enum CellLine {
    /// Course code, drawn bold.
    Code(String),
    Text(String),
    /// Rule between two blocks sharing a cell.
    Separator,
}

/// A measured slot row: one line list per day, in [`Day::ALL`] order.
#[derive(Debug)]
struct SlotRow {
    slot: TimeSlot,
    height: f32,
    cells: Vec<Vec<CellLine>>,
}

fn layout_rows(grid: &ScheduleGrid) -> Vec<SlotRow> {
    let max_chars = ((DAY_COLUMN_WIDTH - 2.0 * CELL_PADDING) / AVG_CHAR_WIDTH) as usize;
    let max_lines = ((BODY_HEIGHT - 2.0 * CELL_PADDING) / LINE_HEIGHT) as usize;

    TimeSlot::ALL
        .into_iter()
        .map(|slot| {
            let cells: Vec<Vec<CellLine>> = Day::ALL
                .into_iter()
                .map(|day| fit_lines(cell_lines(grid.cell(day, slot), max_chars), max_lines))
                .collect();
            let tallest = cells.iter().map(Vec::len).max().unwrap_or(0);
            let height = (tallest as f32 * LINE_HEIGHT + 2.0 * CELL_PADDING).max(MIN_ROW_HEIGHT);
            SlotRow { slot, height, cells }
        })
        .collect()
}

/// Lines for one cell: code, title, hall per block, separated by rules.
fn cell_lines(blocks: &[CourseDisplay], max_chars: usize) -> Vec<CellLine> {
    let mut lines = Vec::new();
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            lines.push(CellLine::Separator);
        }
        lines.extend(wrap_text(&block.course_code, max_chars).into_iter().map(CellLine::Code));
        for field in [&block.course_title, &block.hall] {
            lines.extend(wrap_text(field, max_chars).into_iter().map(CellLine::Text));
        }
    }
    lines
}

/// Truncate to `max_lines`, replacing the last kept line with a count of
/// what was cut.
fn fit_lines(mut lines: Vec<CellLine>, max_lines: usize) -> Vec<CellLine> {
    if lines.len() <= max_lines || max_lines == 0 {
        return lines;
    }
    let hidden = lines.len() - max_lines + 1;
    lines.truncate(max_lines - 1);
    lines.push(CellLine::Text(format!("(+{hidden} more lines)")));
    lines
}

/// Greedy word wrap on whitespace. Words longer than a line are split.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word: String = word.into_iter().collect();
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Split rows into pages that each fit in `available` height.
///
/// Every page gets at least one row, so a row taller than a page still
/// lands somewhere.
fn paginate(heights: &[f32], available: f32) -> Vec<Range<usize>> {
    let mut pages = Vec::new();
    let mut start = 0;
    let mut used = 0.0;

    for (i, &h) in heights.iter().enumerate() {
        if i > start && used + h > available {
            pages.push(start..i);
            start = i;
            used = 0.0;
        }
        used += h;
    }
    pages.push(start..heights.len());
    pages
}
