//! Text extraction for uploaded documents
//!
//! Turns the raw bytes of an uploaded file into plain text. PDFs are parsed
//! page by page; everything else is decoded by trying an ordered list of
//! candidate encodings and falling back to a lossy decode.
//!
//! Extraction never yields an absent value: no text is the empty string.

mod decode;
mod pdf;

pub use decode::{decode_text, TextEncoding};

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors raised while extracting text from a document
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The PDF parser rejected the file
    #[error("Could not read PDF: {0}")]
    Pdf(String),

    /// The file type is not one of the supported upload types
    #[error("Unsupported file type: {0}. Supported types: .txt, .csv, .pdf")]
    UnsupportedType(String),
}

/// Supported upload types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// `text/plain`
    PlainText,
    /// `text/csv`
    Csv,
    /// `application/pdf`
    Pdf,
}

impl DocumentKind {
    /// Parse a declared MIME type, ignoring parameters such as `charset`
    ///
    /// # Examples
    ///
    /// ```
    /// use docchat::extract::DocumentKind;
    ///
    /// assert_eq!(DocumentKind::from_mime("application/pdf"), Some(DocumentKind::Pdf));
    /// assert_eq!(DocumentKind::from_mime("text/csv; charset=utf-8"), Some(DocumentKind::Csv));
    /// assert_eq!(DocumentKind::from_mime("image/png"), None);
    /// ```
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_lowercase();
        match essence.as_str() {
            "text/plain" => Some(Self::PlainText),
            "text/csv" => Some(Self::Csv),
            "application/pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Guess the upload type from a file extension
    ///
    /// # Examples
    ///
    /// ```
    /// use docchat::extract::DocumentKind;
    /// use std::path::Path;
    ///
    /// assert_eq!(DocumentKind::from_path(Path::new("Report.PDF")), Some(DocumentKind::Pdf));
    /// assert_eq!(DocumentKind::from_path(Path::new("notes")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "txt" => Some(Self::PlainText),
            "csv" => Some(Self::Csv),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// MIME type declared for this kind
    pub fn mime(&self) -> &'static str {
        match self {
            Self::PlainText => "text/plain",
            Self::Csv => "text/csv",
            Self::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// How the extracted text was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    /// Parsed from a PDF
    Pdf {
        /// Pages that produced text
        pages_with_text: usize,
        /// Pages in the document
        total_pages: usize,
    },
    /// Decoded cleanly with one of the candidate encodings
    Decoded(TextEncoding),
    /// No candidate decoded cleanly; invalid sequences were replaced
    Lossy,
}

/// Text extracted from an uploaded document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    /// The extracted text (possibly empty)
    pub text: String,
    /// How the text was produced
    pub source: TextSource,
}

impl ExtractedText {
    /// True when the text came from the lossy fallback decode
    ///
    /// Callers should warn the user but still use the text.
    pub fn is_best_effort(&self) -> bool {
        matches!(self.source, TextSource::Lossy)
    }

    /// Length of the text in characters
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Extract plain text from uploaded bytes
///
/// A declared type of `application/pdf` selects the PDF parser. Any other
/// declared type is decoded as text using `encodings` in order.
///
/// # Errors
///
/// Returns `ExtractionError::Pdf` when the PDF parser fails. Text decoding
/// never fails; it degrades to a lossy decode instead.
///
/// # Examples
///
/// ```
/// use docchat::extract::{extract, TextEncoding, TextSource};
///
/// let extracted = extract(b"a,b\n1,2\n", "text/csv", &TextEncoding::DEFAULT_CANDIDATES).unwrap();
/// assert_eq!(extracted.text, "a,b\n1,2\n");
/// assert_eq!(extracted.source, TextSource::Decoded(TextEncoding::Utf8));
/// ```
pub fn extract(
    bytes: &[u8],
    declared_type: &str,
    encodings: &[TextEncoding],
) -> Result<ExtractedText, ExtractionError> {
    if DocumentKind::from_mime(declared_type) == Some(DocumentKind::Pdf) {
        let pdf = pdf::extract_pdf(bytes)?;
        tracing::debug!(
            "Extracted {} chars from {}/{} PDF pages",
            pdf.text.chars().count(),
            pdf.pages_with_text,
            pdf.total_pages
        );
        return Ok(ExtractedText {
            text: pdf.text,
            source: TextSource::Pdf {
                pages_with_text: pdf.pages_with_text,
                total_pages: pdf.total_pages,
            },
        });
    }

    let (text, encoding) = decode_text(bytes, encodings);
    let source = match encoding {
        Some(encoding) => TextSource::Decoded(encoding),
        None => {
            tracing::warn!("No candidate encoding decoded the upload, using lossy UTF-8");
            TextSource::Lossy
        }
    };

    Ok(ExtractedText { text, source })
}
