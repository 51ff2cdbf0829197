//! Table extraction: PDF bytes → flattened rows of cleaned cell text.
//!
//! `pdfplumber` finds ruled tables on each page. Every table on every page is
//! flattened into a single row sequence in document order; page and table
//! boundaries are not kept, so a continuation table on page 2 reads exactly
//! like more rows of the table on page 1.

use crate::error::{DocumentKind, TimetableError};
use crate::output::RawRow;
use crate::pipeline::normalize::clean_text;
use pdfplumber::{Pdf, TableSettings};
use tracing::{debug, info, warn};

/// Extract every non-empty table row from a PDF held in memory.
///
/// The parsed document lives only for the duration of this call.
///
/// # Errors
/// [`TimetableError::DocumentParse`] if the bytes cannot be opened as a PDF,
/// the password is missing or wrong, or a page cannot be interpreted.
pub fn extract_rows(
    document: DocumentKind,
    bytes: &[u8],
    password: Option<&str>,
) -> Result<Vec<RawRow>, TimetableError> {
    let parse_err = |detail: String| TimetableError::DocumentParse { document, detail };

    let pdf = match password {
        Some(pwd) => Pdf::open_with_password(bytes, pwd.as_bytes(), None),
        None => Pdf::open(bytes, None),
    }
    .map_err(|e| parse_err(e.to_string()))?;

    let settings = TableSettings::default();
    let mut rows = Vec::new();
    let mut table_count = 0usize;

    for page in pdf.pages_iter() {
        let page = page.map_err(|e| parse_err(e.to_string()))?;
        let tables = page.find_tables(&settings);
        debug!(
            "{}: page {} has {} table(s)",
            document,
            page.page_number(),
            tables.len()
        );
        table_count += tables.len();

        for table in &tables {
            rows.extend(clean_rows(
                table
                    .rows
                    .iter()
                    .map(|row| row.iter().map(|cell| cell.text.as_deref())),
            ));
        }
    }

    if rows.is_empty() {
        warn!("{}: no ruled table rows found", document);
    }
    info!(
        "{}: {} rows from {} table(s) on {} page(s)",
        document,
        rows.len(),
        table_count,
        pdf.page_count()
    );
    Ok(rows)
}

/// Clean each cell and drop rows with no text at all.
///
/// A missing cell (merged or empty in the source) becomes `""` so column
/// positions are preserved for the record parser.
pub fn clean_rows<'a, R, C>(rows: R) -> Vec<RawRow>
where
    R: IntoIterator<Item = C>,
    C: IntoIterator<Item = Option<&'a str>>,
{
    rows.into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| cell.map(clean_text).unwrap_or_default())
                .collect::<RawRow>()
        })
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect()
}
