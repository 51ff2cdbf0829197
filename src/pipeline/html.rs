//! HTML rendering of a [`ScheduleGrid`].
//!
//! Produces a standalone page: one header row of days, one row per slot,
//! one `course-info` block per course with a dashed separator between
//! blocks that share a cell. Needs no native library. It is only used when
//! selected explicitly, either injected through the config or picked with
//! `--format html` in the CLI; a pdfium binding failure is reported, never
//! retried as HTML.

use crate::error::TimetableError;
use crate::pipeline::render::GridRenderer;
use crate::schedule::{CourseDisplay, Day, ScheduleGrid, TimeSlot};

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; }
.timetable { border-collapse: collapse; width: 100%; }
.timetable th, .timetable td { border: 1px solid #ddd; padding: 12px; text-align: center; vertical-align: top; }
.timetable th { background-color: #4CAF50; color: white; font-weight: bold; }
.timetable tr:nth-child(even) { background-color: #f2f2f2; }
.time-slot { font-weight: bold; color: #333; }
.course-info { font-size: 12px; margin: 5px 0; }
.course-code { font-weight: bold; color: #2c3e50; }
.course-title { color: #34495e; }
.course-hall { color: #7f8c8d; font-style: italic; }
.separator { border-top: 1px dashed #bdc3c7; margin: 8px 0; }
";

/// Renders the grid as a UTF-8 HTML document.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    title: String,
}

impl HtmlRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl GridRenderer for HtmlRenderer {
    fn render(&self, grid: &ScheduleGrid) -> Result<Vec<u8>, TimetableError> {
        Ok(render_html(grid, &self.title).into_bytes())
    }
}

/// Build the full HTML page for `grid`.
pub fn render_html(grid: &ScheduleGrid, title: &str) -> String {
    let title = escape_html(title);
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n"));
    html.push_str("<style>\n");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str(&format!("<h1>{title}</h1>\n"));
    html.push_str("<table class=\"timetable\">\n<thead>\n<tr><th>Time/Day</th>");
    for day in Day::ALL {
        html.push_str(&format!("<th>{day}</th>"));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for slot in TimeSlot::ALL {
        html.push_str(&format!("<tr><td class=\"time-slot\">{slot}</td>"));
        for day in Day::ALL {
            html.push_str("<td>");
            push_cell(&mut html, grid.cell(day, slot));
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}

fn push_cell(html: &mut String, blocks: &[CourseDisplay]) {
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            html.push_str("<div class=\"separator\"></div>");
        }
        html.push_str(&format!(
            "<div class=\"course-info\">\
<div class=\"course-code\">{}</div>\
<div class=\"course-title\">{}</div>\
<div class=\"course-hall\">{}</div>\
</div>",
            escape_html(&block.course_code),
            escape_html(&block.course_title),
            escape_html(&block.hall),
        ));
    }
}

/// Escape HTML special characters.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
