//! Error types for the edgequake-timetable library.
//!
//! Only document- and request-level failures are errors. A faculty row with
//! five columns, a day spelled "Sun", or a time printed as "TBA" is not an
//! error: the pipeline drops such rows silently and keeps going, so one
//! malformed line never costs the student their whole timetable.
//!
//! Every variant below aborts the current request; no partial
//! [`crate::ScheduleGrid`] is ever returned alongside an `Err`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which of the two input documents an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// The faculty master timetable (code, title, day, time, hall, lecturer).
    Faculty,
    /// The student's registered-course list, "Form B" (code, title, status).
    FormB,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Faculty => f.write_str("faculty timetable"),
            DocumentKind::FormB => f.write_str("Form B"),
        }
    }
}

/// All fatal errors returned by the edgequake-timetable library.
#[derive(Debug, Error)]
pub enum TimetableError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// A document was not supplied at all.
    #[error("No {document} was provided.\nBoth the faculty timetable and Form B are required.")]
    MissingInput { document: DocumentKind },

    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The document is not a PDF (wrong extension or wrong magic bytes).
    #[error("The {document} is not a valid PDF: {reason}")]
    InvalidFormat {
        document: DocumentKind,
        reason: String,
    },

    /// The document exceeds the configured size cap.
    #[error("The {document} is {size} bytes, larger than the {limit}-byte limit")]
    InputTooLarge {
        document: DocumentKind,
        size: u64,
        limit: u64,
    },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// The table extractor could not open or interpret the document.
    #[error("Could not read tables from the {document}: {detail}")]
    DocumentParse {
        document: DocumentKind,
        detail: String,
    },

    // ── Rendering errors ──────────────────────────────────────────────────
    /// The renderer failed to produce output.
    #[error("Failed to render timetable: {detail}")]
    RenderFailed { detail: String },

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
PDF output needs the pdfium shared library. You can:\n\
  • Set PDFIUM_LIB_PATH=/path/to/dir/containing/libpdfium.\n\
  • Pass --pdfium-lib-path <DIR>.\n\
  • Use --format html to skip pdfium entirely.\n"
    )]
    PdfiumBindingFailed(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TimetableError {
    /// The document this error is about, when it concerns a single input.
    pub fn document(&self) -> Option<DocumentKind> {
        match self {
            TimetableError::MissingInput { document }
            | TimetableError::InvalidFormat { document, .. }
            | TimetableError::InputTooLarge { document, .. }
            | TimetableError::DocumentParse { document, .. } => Some(*document),
            _ => None,
        }
    }
}
