//! PDF text extraction (pdf-extract).

use tracing::{debug, instrument};

use crate::error::QuizError;

const PAGE_BREAK: &str = "\n\n";

/// Concatenated text of every page, in page order, with no separators.
/// Any parse failure fails the whole document.
///
/// pdf-extract opens every page with a "\n\n" page-break marker; it is dropped.
#[instrument(level = "info", skip(pdf_bytes), fields(bytes = pdf_bytes.len()))]
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String, QuizError> {
  let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
    .map_err(|e| QuizError::Extraction(e.to_string()))?;
  debug!(target: "quiz", pages = pages.len(), "PDF pages extracted");
  Ok(pages.iter().map(|p| p.strip_prefix(PAGE_BREAK).unwrap_or(p)).collect())
}
