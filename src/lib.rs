//! # edgequake-timetable
//!
//! Build a student's personalised weekly timetable from two PDFs: the
//! faculty's master timetable and the student's registered-course list
//! ("Form B").
//!
//! ## Pipeline Overview
//!
//! ```text
//! faculty.pdf ─┐
//!              ├─ 1. Input    resolve path or URL, check .pdf / %PDF / size
//! form_b.pdf ──┤
//!              ├─ 2. Extract  ruled tables on every page → flat rows
//!              ├─ 3. Parse    positional columns → course / registration records
//!              ├─ 4. Match    keep faculty courses listed on Form B
//!              ├─ 5. Grid     Monday–Saturday × six two-hour slots
//!              └─ 6. Render   PDF via pdfium, or standalone HTML
//! ```
//!
//! Malformed rows never fail a request: a short row, a Sunday class or a
//! "TBA" time is dropped and the rest of the timetable is still built.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_timetable::{generate, render_to_file, TimetableConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TimetableConfig::default();
//!     let output = generate("faculty.pdf", "form_b.pdf", &config).await?;
//!     render_to_file(&output.timetable, "timetable.pdf", &config).await?;
//!     eprintln!("{} courses placed", output.timetable.course_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2timetable` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! edgequake-timetable = { version = "0.1", default-features = false }
//! ```
//!
//! PDF output needs the pdfium shared library at run time. Point
//! `PDFIUM_LIB_PATH` at it, or render with [`HtmlRenderer`] instead.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod schedule;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{TimetableConfig, TimetableConfigBuilder};
pub use error::{DocumentKind, TimetableError};
pub use generate::{
    generate, generate_from_bytes, generate_sync, generate_to_file, render_timetable,
    render_to_file, timetable_from_rows, write_atomic,
};
pub use output::{CourseEntry, RawRow, RegistrationEntry, TimetableOutput, TimetableStats};
pub use pipeline::html::HtmlRenderer;
pub use pipeline::render::{GridRenderer, PdfiumRenderer};
pub use progress::{NoopProgressCallback, ProgressCallback, TimetableProgressCallback};
pub use schedule::{CourseDisplay, Day, ScheduleGrid, TimeSlot};
