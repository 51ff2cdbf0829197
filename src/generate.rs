//! Timetable generation entry points.
//!
//! [`generate`] resolves both inputs (path or URL), then runs the blocking
//! pipeline once on a `spawn_blocking` thread. [`generate_from_bytes`] is
//! that blocking core for callers who already hold the bytes, and
//! [`timetable_from_rows`] is the pure part below table extraction.
//!
//! Rendering is a separate step so a caller can generate once, show the
//! JSON, and render later from the same grid.

use crate::config::TimetableConfig;
use crate::error::{DocumentKind, TimetableError};
use crate::output::{RawRow, TimetableOutput, TimetableStats};
use crate::pipeline::{extract, grid, input, matcher, parse};
use crate::schedule::ScheduleGrid;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Build a personalised timetable from a faculty timetable and a Form B.
///
/// # Arguments
/// * `faculty` — local path or HTTP/HTTPS URL of the faculty timetable PDF
/// * `form_b`  — local path or HTTP/HTTPS URL of the student's Form B PDF
/// * `config`  — limits, password and progress callback
///
/// # Errors
/// Any input, download or extraction failure aborts the request. Rows that
/// cannot be placed are not errors; they are counted in
/// [`TimetableOutput::stats`].
///
/// # Example
/// ```rust,no_run
/// use edgequake_timetable::{generate, TimetableConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = TimetableConfig::default();
/// let output = generate("faculty.pdf", "form_b.pdf", &config).await?;
/// println!("{}", serde_json::to_string_pretty(&output)?);
/// # Ok(())
/// # }
/// ```
pub async fn generate(
    faculty: impl AsRef<str>,
    form_b: impl AsRef<str>,
    config: &TimetableConfig,
) -> Result<TimetableOutput, TimetableError> {
    let start = Instant::now();
    info!(
        "Generating timetable: faculty={} form_b={}",
        faculty.as_ref(),
        form_b.as_ref()
    );

    // ── Step 1: Resolve inputs ───────────────────────────────────────────
    let faculty_doc = load(DocumentKind::Faculty, faculty.as_ref(), config).await?;
    let form_b_doc = load(DocumentKind::FormB, form_b.as_ref(), config).await?;

    // ── Step 2: Extract → parse → match → build ──────────────────────────
    // Start events already fired in `load`.
    let config = config.clone();
    let output = tokio::task::spawn_blocking(move || {
        build_from_bytes(&faculty_doc.bytes, &form_b_doc.bytes, &config, false)
    })
    .await
    .map_err(|e| TimetableError::Internal(format!("Pipeline task panicked: {}", e)))??;

    info!("Timetable generated in {}ms", start.elapsed().as_millis());
    Ok(output)
}

/// Synchronous wrapper around [`generate`].
///
/// Creates a temporary tokio runtime internally.
pub fn generate_sync(
    faculty: impl AsRef<str>,
    form_b: impl AsRef<str>,
    config: &TimetableConfig,
) -> Result<TimetableOutput, TimetableError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| TimetableError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(generate(faculty, form_b, config))
}

/// Build a timetable from two PDFs already in memory.
///
/// Blocking: table extraction is CPU-bound. Both byte slices are checked
/// against the size cap and the `%PDF` magic before extraction, and the
/// faculty timetable is processed first.
pub fn generate_from_bytes(
    faculty: &[u8],
    form_b: &[u8],
    config: &TimetableConfig,
) -> Result<TimetableOutput, TimetableError> {
    build_from_bytes(faculty, form_b, config, true)
}

fn build_from_bytes(
    faculty: &[u8],
    form_b: &[u8],
    config: &TimetableConfig,
    announce: bool,
) -> Result<TimetableOutput, TimetableError> {
    let faculty_rows = extract_document(DocumentKind::Faculty, faculty, config, announce)?;
    let form_b_rows = extract_document(DocumentKind::FormB, form_b, config, announce)?;

    let output = timetable_from_rows(&faculty_rows, &form_b_rows);

    if let Some(cb) = config.progress() {
        let stats = output.stats(0);
        cb.on_timetable_complete(stats.placed_courses, stats.unplaced_courses);
    }
    Ok(output)
}

/// Parse, match and place already-extracted rows.
///
/// Pure and infallible: rows that do not fit are dropped.
pub fn timetable_from_rows(faculty_rows: &[RawRow], form_b_rows: &[RawRow]) -> TimetableOutput {
    let faculty = parse::parse_faculty_rows(faculty_rows);
    let student_courses = parse::parse_registration_rows(form_b_rows);
    let filtered_courses = matcher::match_courses(&faculty, &student_courses);
    let timetable = grid::build_grid(&filtered_courses);

    let output = TimetableOutput {
        timetable,
        student_courses,
        filtered_courses,
    };
    let stats = output.stats(0);
    info!(
        "{} registered, {} matched, {} placed, {} unplaced",
        stats.student_courses, stats.filtered_courses, stats.placed_courses, stats.unplaced_courses
    );
    output
}

/// Render a grid with the configured renderer.
///
/// Runs inside `spawn_blocking`: pdfium calls are synchronous.
pub async fn render_timetable(
    grid: &ScheduleGrid,
    config: &TimetableConfig,
) -> Result<Vec<u8>, TimetableError> {
    let renderer = config.resolve_renderer();
    let grid = grid.clone();

    tokio::task::spawn_blocking(move || renderer.render(&grid))
        .await
        .map_err(|e| TimetableError::Internal(format!("Render task panicked: {}", e)))?
}

/// Render a grid and write it to `output_path`.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn render_to_file(
    grid: &ScheduleGrid,
    output_path: impl AsRef<Path>,
    config: &TimetableConfig,
) -> Result<(), TimetableError> {
    let bytes = render_timetable(grid, config).await?;
    let path = output_path.as_ref().to_path_buf();

    tokio::task::spawn_blocking(move || write_atomic(&path, &bytes))
        .await
        .map_err(|e| TimetableError::Internal(format!("Write task panicked: {}", e)))?
}

/// Generate a timetable, render it and write the result to a file.
pub async fn generate_to_file(
    faculty: impl AsRef<str>,
    form_b: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &TimetableConfig,
) -> Result<TimetableStats, TimetableError> {
    let start = Instant::now();
    let output = generate(faculty, form_b, config).await?;
    render_to_file(&output.timetable, output_path.as_ref(), config).await?;

    let stats = output.stats(start.elapsed().as_millis() as u64);
    info!(
        "Wrote {} ({} courses placed, {}ms)",
        output_path.as_ref().display(),
        stats.placed_courses,
        stats.total_duration_ms
    );
    Ok(stats)
}

/// Write `bytes` to `path` through a temp file in the same directory.
///
/// Missing parent directories are created. The target is either fully
/// replaced or left untouched.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), TimetableError> {
    let write_err = |source: std::io::Error| TimetableError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

// ── Internal helpers ─────────────────────────────────────────────────────

async fn load(
    kind: DocumentKind,
    source: &str,
    config: &TimetableConfig,
) -> Result<input::LoadedDocument, TimetableError> {
    if let Some(cb) = config.progress() {
        cb.on_document_start(kind);
    }

    input::load_document(
        kind,
        source,
        config.max_input_bytes,
        config.download_timeout_secs,
    )
    .await
    .inspect_err(|e| report_error(config, kind, e))
}

fn extract_document(
    kind: DocumentKind,
    bytes: &[u8],
    config: &TimetableConfig,
    announce: bool,
) -> Result<Vec<RawRow>, TimetableError> {
    if announce {
        if let Some(cb) = config.progress() {
            cb.on_document_start(kind);
        }
    }

    let rows = input::validate_pdf_bytes(kind, bytes, config.max_input_bytes)
        .and_then(|()| extract::extract_rows(kind, bytes, config.password.as_deref()))
        .inspect_err(|e| report_error(config, kind, e))?;

    if let Some(cb) = config.progress() {
        cb.on_document_extracted(kind, rows.len());
    }
    Ok(rows)
}

fn report_error(config: &TimetableConfig, kind: DocumentKind, error: &TimetableError) {
    if let Some(cb) = config.progress() {
        cb.on_document_error(kind, &error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::render::GridRenderer;
    use crate::progress::TimetableProgressCallback;
    use crate::schedule::{Day, TimeSlot};
    use std::sync::{Arc, Mutex};

    fn row(cells: &[&str]) -> RawRow {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn single_course_lands_in_monday_early_slot() {
        let faculty = vec![row(&["CS101", "Intro to CS", "Mon", "7-9", "Hall A", "Dr. X"])];
        let form_b = vec![row(&["CS101", "Intro to CS", "Registered"])];

        let output = timetable_from_rows(&faculty, &form_b);
        let cell = output.timetable.cell(Day::Monday, TimeSlot::Early);
        assert_eq!(cell.len(), 1);
        assert_eq!(cell[0].course_code, "CS101");
        assert_eq!(cell[0].course_title, "Intro to CS");
        assert_eq!(cell[0].hall, "Hall A");
        assert_eq!(output.timetable.course_count(), 1);
        assert_eq!(output.student_courses.len(), 1);
        assert_eq!(output.filtered_courses.len(), 1);
    }

    #[test]
    fn unregistered_and_off_grid_courses_are_left_out() {
        let faculty = vec![
            row(&["Course Code", "Title", "Day", "Time", "Venue", "Lecturer"]),
            row(&["CS101", "Intro", "Tue", "9-11", "LT1", "Dr. X"]),
            row(&["CS102", "DS", "Sun", "9-11", "LT2", "Dr. Y"]),
            row(&["MTH101", "Calc", "Wed", "11-13", "LT3", "Dr. Z"]),
        ];
        let form_b = vec![
            row(&["Course Code", "Title", "Status"]),
            row(&["CS101", "Intro", "Registered"]),
            row(&["CS102", "DS", "Registered"]),
        ];

        let output = timetable_from_rows(&faculty, &form_b);
        let stats = output.stats(0);
        assert_eq!(stats.student_courses, 3);
        // The shared "Course Code" header matches itself: counted, never placed.
        assert_eq!(stats.filtered_courses, 3);
        assert_eq!(stats.placed_courses, 1);
        assert_eq!(stats.unplaced_courses, 2);
        assert_eq!(output.filtered_courses[0].course_code, "Course Code");
        assert_eq!(output.filtered_courses[0].day, "Day");
        assert!(output.timetable.cell(Day::Wednesday, TimeSlot::Midday).is_empty());
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl TimetableProgressCallback for Recorder {
        fn on_document_start(&self, document: DocumentKind) {
            self.0.lock().unwrap().push(format!("start {document}"));
        }
        fn on_document_error(&self, document: DocumentKind, _error: &str) {
            self.0.lock().unwrap().push(format!("error {document}"));
        }
    }

    #[test]
    fn bad_faculty_bytes_abort_before_form_b() {
        let recorder = Arc::new(Recorder::default());
        let config = TimetableConfig::builder()
            .progress_callback(recorder.clone())
            .build()
            .unwrap();

        let err = generate_from_bytes(b"not a pdf", b"%PDF-1.4", &config).unwrap_err();
        assert_eq!(err.document(), Some(DocumentKind::Faculty));
        assert!(matches!(err, TimetableError::InvalidFormat { .. }));
        assert_eq!(
            *recorder.0.lock().unwrap(),
            vec!["start faculty timetable", "error faculty timetable"]
        );
    }

    #[test]
    fn empty_bytes_are_missing_input() {
        let err = generate_from_bytes(b"", b"", &TimetableConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            TimetableError::MissingInput {
                document: DocumentKind::Faculty
            }
        ));
    }

    struct FixedRenderer;

    impl GridRenderer for FixedRenderer {
        fn render(&self, grid: &ScheduleGrid) -> Result<Vec<u8>, TimetableError> {
            Ok(format!("{} courses", grid.course_count()).into_bytes())
        }
    }

    #[tokio::test]
    async fn render_to_file_uses_injected_renderer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("timetable.pdf");
        let config = TimetableConfig::builder()
            .renderer(Arc::new(FixedRenderer))
            .build()
            .unwrap();

        render_to_file(&ScheduleGrid::new(), &path, &config)
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0 courses");
    }

    #[test]
    fn write_atomic_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "old").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
