//! Progress-callback trait for per-document pipeline events.
//!
//! Inject an [`Arc<dyn TimetableProgressCallback>`] via
//! [`crate::config::TimetableConfigBuilder::progress_callback`] to receive
//! events as each document is extracted and the grid is assembled.
//!
//! # Example
//!
//! ```rust
//! use edgequake_timetable::{DocumentKind, TimetableConfig, TimetableProgressCallback};
//! use std::sync::Arc;
//!
//! struct Printer;
//!
//! impl TimetableProgressCallback for Printer {
//!     fn on_document_extracted(&self, document: DocumentKind, rows: usize) {
//!         eprintln!("{document}: {rows} rows");
//!     }
//! }
//!
//! let config = TimetableConfig::builder()
//!     .progress_callback(Arc::new(Printer) as Arc<dyn TimetableProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::error::DocumentKind;
use std::sync::Arc;

/// Called by the pipeline as it works through the two documents.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. The pipeline runs on a blocking thread, so
/// implementations must be `Send + Sync`.
pub trait TimetableProgressCallback: Send + Sync {
    /// Called before a document is read from disk, downloaded or opened.
    ///
    /// Fired exactly once per document and always before
    /// [`on_document_extracted`](Self::on_document_extracted) or
    /// [`on_document_error`](Self::on_document_error) for that document.
    /// With [`crate::generate()`] both documents are loaded before either is
    /// extracted, so both start events arrive first.
    fn on_document_start(&self, document: DocumentKind) {
        let _ = document;
    }

    /// Called once a document's tables have been flattened into rows.
    ///
    /// # Arguments
    /// * `rows` — non-empty rows extracted across all pages and tables
    fn on_document_extracted(&self, document: DocumentKind, rows: usize) {
        let _ = (document, rows);
    }

    /// Called when a document fails to load or parse. The request aborts
    /// right after this call.
    fn on_document_error(&self, document: DocumentKind, error: &str) {
        let _ = (document, error);
    }

    /// Called once the grid has been built.
    ///
    /// # Arguments
    /// * `placed`   — matched courses that landed in a grid cell
    /// * `unplaced` — matched courses whose day or time is not on the grid
    fn on_timetable_complete(&self, placed: usize, unplaced: usize) {
        let _ = (placed, unplaced);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl TimetableProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::TimetableConfig`].
pub type ProgressCallback = Arc<dyn TimetableProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct TrackingCallback {
        started: AtomicUsize,
        rows: AtomicUsize,
        errors: Mutex<Vec<(DocumentKind, String)>>,
        placed: AtomicUsize,
    }

    impl TimetableProgressCallback for TrackingCallback {
        fn on_document_start(&self, _document: DocumentKind) {
            self.started.fetch_add(1, Ordering::SeqCst);
        }

        fn on_document_extracted(&self, _document: DocumentKind, rows: usize) {
            self.rows.fetch_add(rows, Ordering::SeqCst);
        }

        fn on_document_error(&self, document: DocumentKind, error: &str) {
            self.errors.lock().unwrap().push((document, error.to_string()));
        }

        fn on_timetable_complete(&self, placed: usize, _unplaced: usize) {
            self.placed.store(placed, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_document_start(DocumentKind::Faculty);
        cb.on_document_extracted(DocumentKind::Faculty, 12);
        cb.on_document_error(DocumentKind::FormB, "bad xref");
        cb.on_timetable_complete(3, 1);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();

        tracker.on_document_start(DocumentKind::Faculty);
        tracker.on_document_extracted(DocumentKind::Faculty, 40);
        tracker.on_document_start(DocumentKind::FormB);
        tracker.on_document_error(DocumentKind::FormB, "encrypted");

        assert_eq!(tracker.started.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.rows.load(Ordering::SeqCst), 40);
        let errors = tracker.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, DocumentKind::FormB);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(TrackingCallback::default());
        cb.on_timetable_complete(5, 0);
    }
}
