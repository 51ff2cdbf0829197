//! Configuration types for timetable generation.
//!
//! All behaviour is controlled through [`TimetableConfig`], built via its
//! [`TimetableConfigBuilder`]. The parsing rules themselves (column
//! positions, day aliases, canonical slots) are fixed and not configurable;
//! the config only covers input limits, rendering and observability.

use crate::error::TimetableError;
use crate::pipeline::render::{GridRenderer, PdfiumRenderer};
use crate::progress::{ProgressCallback, TimetableProgressCallback};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Default per-document size cap: 16 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;

/// Default heading printed above the rendered grid.
pub const DEFAULT_TITLE: &str = "Personalized Timetable";

/// Configuration for a timetable request.
///
/// Built via [`TimetableConfig::builder()`] or using
/// [`TimetableConfig::default()`].
///
/// # Example
/// ```rust
/// use edgequake_timetable::TimetableConfig;
///
/// let config = TimetableConfig::builder()
///     .max_input_bytes(4 * 1024 * 1024)
///     .title("Semester 1: Jane Doe")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct TimetableConfig {
    /// Maximum size of each input document in bytes. Default: 16 MiB.
    ///
    /// Checked before a file is read or after a download completes, so an
    /// oversized upload is rejected without being handed to the extractor.
    pub max_input_bytes: u64,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,

    /// User password for encrypted input PDFs. Applied to both documents.
    pub password: Option<String>,

    /// Heading used by the renderers. Default: "Personalized Timetable".
    pub title: String,

    /// Directory containing the pdfium shared library.
    ///
    /// If `None`, `PDFIUM_LIB_PATH` is consulted, then the system library.
    pub pdfium_lib_path: Option<PathBuf>,

    /// Pre-constructed renderer. Takes precedence over the pdfium default.
    pub renderer: Option<Arc<dyn GridRenderer>>,

    /// Optional progress callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            download_timeout_secs: 120,
            password: None,
            title: DEFAULT_TITLE.to_string(),
            pdfium_lib_path: None,
            renderer: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for TimetableConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimetableConfig")
            .field("max_input_bytes", &self.max_input_bytes)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("title", &self.title)
            .field("pdfium_lib_path", &self.pdfium_lib_path)
            .field("renderer", &self.renderer.as_ref().map(|_| "<dyn GridRenderer>"))
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn TimetableProgressCallback>"),
            )
            .finish()
    }
}

impl TimetableConfig {
    /// Create a new builder for `TimetableConfig`.
    pub fn builder() -> TimetableConfigBuilder {
        TimetableConfigBuilder {
            config: Self::default(),
        }
    }

    /// The renderer to use: the injected one, or pdfium with this config's
    /// title and library path.
    pub fn resolve_renderer(&self) -> Arc<dyn GridRenderer> {
        match self.renderer {
            Some(ref renderer) => Arc::clone(renderer),
            None => Arc::new(PdfiumRenderer::new(
                self.title.clone(),
                self.pdfium_lib_path.clone(),
            )),
        }
    }

    pub(crate) fn progress(&self) -> Option<&dyn TimetableProgressCallback> {
        self.progress_callback.as_deref()
    }
}

/// Builder for [`TimetableConfig`].
pub struct TimetableConfigBuilder {
    config: TimetableConfig,
}

impl fmt::Debug for TimetableConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimetableConfigBuilder")
            .field("config", &self.config)
            .finish()
    }
}

impl TimetableConfigBuilder {
    pub fn max_input_bytes(mut self, bytes: u64) -> Self {
        self.config.max_input_bytes = bytes;
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn pdfium_lib_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.pdfium_lib_path = Some(dir.into());
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn GridRenderer>) -> Self {
        self.config.renderer = Some(renderer);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<TimetableConfig, TimetableError> {
        let c = &self.config;
        if c.max_input_bytes == 0 {
            return Err(TimetableError::InvalidConfig(
                "max_input_bytes must be ≥ 1".into(),
            ));
        }
        if c.title.trim().is_empty() {
            return Err(TimetableError::InvalidConfig(
                "title must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upload_limits() {
        let c = TimetableConfig::default();
        assert_eq!(c.max_input_bytes, 16 * 1024 * 1024);
        assert_eq!(c.title, "Personalized Timetable");
        assert!(c.renderer.is_none());
    }

    #[test]
    fn builder_rejects_zero_size_cap() {
        let err = TimetableConfig::builder()
            .max_input_bytes(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, TimetableError::InvalidConfig(_)));
    }

    #[test]
    fn builder_rejects_blank_title() {
        assert!(TimetableConfig::builder().title("   ").build().is_err());
    }

    #[test]
    fn debug_redacts_password() {
        let c = TimetableConfig::builder()
            .password("hunter2")
            .build()
            .unwrap();
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("<redacted>"));
    }
}
