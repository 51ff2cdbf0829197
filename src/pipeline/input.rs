//! Input resolution: turn a user-supplied path or URL into validated PDF bytes.
//!
//! Both documents go through the same checks before the extractor sees them:
//! the input must be present, a local file must carry a `.pdf` extension,
//! the content must start with the `%PDF` magic bytes, and it must fit the
//! configured size cap. Files are read fully into memory and closed before
//! extraction starts, so no file handle outlives this stage.

use crate::error::{DocumentKind, TimetableError};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A document that passed input validation.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub kind: DocumentKind,
    /// The path or URL it was loaded from.
    pub source: String,
    pub bytes: Vec<u8>,
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// `true` when the path ends in `.pdf`, ignoring case.
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Load one document from a local path or an HTTP/HTTPS URL.
pub async fn load_document(
    kind: DocumentKind,
    input: &str,
    max_bytes: u64,
    timeout_secs: u64,
) -> Result<LoadedDocument, TimetableError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TimetableError::MissingInput { document: kind });
    }

    let bytes = if is_url(input) {
        download_url(kind, input, max_bytes, timeout_secs).await?
    } else {
        read_local(kind, input, max_bytes)?
    };

    Ok(LoadedDocument {
        kind,
        source: input.to_string(),
        bytes,
    })
}

/// Validate bytes already in memory: size cap and `%PDF` magic.
pub fn validate_pdf_bytes(
    kind: DocumentKind,
    bytes: &[u8],
    max_bytes: u64,
) -> Result<(), TimetableError> {
    if bytes.is_empty() {
        return Err(TimetableError::MissingInput { document: kind });
    }
    let size = bytes.len() as u64;
    if size > max_bytes {
        return Err(TimetableError::InputTooLarge {
            document: kind,
            size,
            limit: max_bytes,
        });
    }
    if !bytes.starts_with(b"%PDF") {
        let head: Vec<u8> = bytes.iter().take(4).copied().collect();
        return Err(TimetableError::InvalidFormat {
            document: kind,
            reason: format!("missing %PDF header (first bytes: {head:?})"),
        });
    }
    Ok(())
}

/// Read a local file after checking existence, extension and size.
fn read_local(kind: DocumentKind, path_str: &str, max_bytes: u64) -> Result<Vec<u8>, TimetableError> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(TimetableError::FileNotFound { path });
    }
    if !has_pdf_extension(&path) {
        return Err(TimetableError::InvalidFormat {
            document: kind,
            reason: format!("'{}' does not have a .pdf extension", path.display()),
        });
    }

    let mut file = match std::fs::File::open(&path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(TimetableError::PermissionDenied { path });
        }
        Err(_) => return Err(TimetableError::FileNotFound { path }),
    };

    let size = file
        .metadata()
        .map_err(|e| TimetableError::Internal(format!("stat '{}': {e}", path.display())))?
        .len();
    if size > max_bytes {
        return Err(TimetableError::InputTooLarge {
            document: kind,
            size,
            limit: max_bytes,
        });
    }

    let mut bytes = Vec::with_capacity(size as usize);
    file.read_to_end(&mut bytes)
        .map_err(|e| TimetableError::Internal(format!("read '{}': {e}", path.display())))?;
    drop(file);

    validate_pdf_bytes(kind, &bytes, max_bytes)?;
    debug!("Loaded {} from {} ({} bytes)", kind, path.display(), bytes.len());
    Ok(bytes)
}

/// Download a URL into memory.
async fn download_url(
    kind: DocumentKind,
    url: &str,
    max_bytes: u64,
    timeout_secs: u64,
) -> Result<Vec<u8>, TimetableError> {
    info!("Downloading {} from: {}", kind, url);

    let failed = |reason: String| TimetableError::DownloadFailed {
        url: url.to_string(),
        reason,
    };

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| failed(e.to_string()))?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            TimetableError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            failed(e.to_string())
        }
    })?;

    if !response.status().is_success() {
        return Err(failed(format!("HTTP {}", response.status())));
    }

    if let Some(len) = response.content_length() {
        if len > max_bytes {
            return Err(TimetableError::InputTooLarge {
                document: kind,
                size: len,
                limit: max_bytes,
            });
        }
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| failed(e.to_string()))?
        .to_vec();

    validate_pdf_bytes(kind, &bytes, max_bytes)?;
    info!("Downloaded {} bytes for {}", bytes.len(), kind);
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        f.write_all(contents).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/timetable.pdf"));
        assert!(is_url("http://example.com/formb.pdf"));
        assert!(!is_url("/tmp/formb.pdf"));
        assert!(!is_url(""));
    }

    #[test]
    fn pdf_extension_is_case_insensitive() {
        assert!(has_pdf_extension(Path::new("a/b/Faculty.PDF")));
        assert!(has_pdf_extension(Path::new("formb.pdf")));
        assert!(!has_pdf_extension(Path::new("formb.docx")));
        assert!(!has_pdf_extension(Path::new("pdf")));
    }

    #[test]
    fn validate_rejects_wrong_magic() {
        let err = validate_pdf_bytes(DocumentKind::Faculty, b"PK\x03\x04zip", 1024).unwrap_err();
        assert!(matches!(err, TimetableError::InvalidFormat { .. }));
    }

    #[test]
    fn validate_rejects_oversized() {
        let err = validate_pdf_bytes(DocumentKind::FormB, b"%PDF-1.7 ....", 4).unwrap_err();
        assert!(matches!(err, TimetableError::InputTooLarge { limit: 4, .. }));
    }

    #[test]
    fn validate_treats_empty_upload_as_missing() {
        let err = validate_pdf_bytes(DocumentKind::FormB, b"", 4).unwrap_err();
        assert!(matches!(err, TimetableError::MissingInput { .. }));
    }

    #[tokio::test]
    async fn blank_input_is_missing() {
        let err = load_document(DocumentKind::Faculty, "  ", 1024, 5)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TimetableError::MissingInput {
                document: DocumentKind::Faculty
            }
        ));
    }

    #[tokio::test]
    async fn nonexistent_file_is_not_found() {
        let err = load_document(DocumentKind::Faculty, "/no/such/faculty.pdf", 1024, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, TimetableError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn non_pdf_extension_is_invalid_format() {
        let f = temp_file(".txt", b"%PDF-1.4");
        let err = load_document(DocumentKind::FormB, f.path().to_str().unwrap(), 1024, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, TimetableError::InvalidFormat { .. }));
    }

    #[tokio::test]
    async fn valid_local_file_is_loaded() {
        let f = temp_file(".pdf", b"%PDF-1.4\n%%EOF\n");
        let doc = load_document(DocumentKind::FormB, f.path().to_str().unwrap(), 1024, 5)
            .await
            .unwrap();
        assert_eq!(doc.kind, DocumentKind::FormB);
        assert!(doc.bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn oversized_local_file_is_rejected_before_reading() {
        let f = temp_file(".pdf", &[b'%'; 64]);
        let err = load_document(DocumentKind::Faculty, f.path().to_str().unwrap(), 16, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, TimetableError::InputTooLarge { size: 64, .. }));
    }
}
