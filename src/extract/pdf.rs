//! PDF page text extraction

use super::ExtractionError;
use lopdf::Document;

/// Text pulled from the pages of a PDF
#[derive(Debug, Clone)]
pub(crate) struct PdfText {
    pub text: String,
    pub pages_with_text: usize,
    pub total_pages: usize,
}

/// Extract text page by page, joining non-empty pages with newlines
///
/// Any parser failure, on load or on a single page, fails the whole
/// document; the caller decides what to show instead.
pub(crate) fn extract_pdf(bytes: &[u8]) -> Result<PdfText, ExtractionError> {
    let document = Document::load_mem(bytes).map_err(|e| {
        tracing::warn!("Failed to parse PDF: {}", e);
        ExtractionError::Pdf(e.to_string())
    })?;

    let pages = document.get_pages();
    let total_pages = pages.len();
    let mut page_texts = Vec::with_capacity(total_pages);

    for page_number in pages.keys() {
        let text = document
            .extract_text(&[*page_number])
            .map_err(|e| ExtractionError::Pdf(format!("page {}: {}", page_number, e)))?;

        let text = text.trim_end();
        if text.trim().is_empty() {
            tracing::debug!("PDF page {} has no extractable text", page_number);
            continue;
        }
        page_texts.push(text.to_string());
    }

    Ok(PdfText {
        pages_with_text: page_texts.len(),
        total_pages,
        text: page_texts.join("\n"),
    })
}
