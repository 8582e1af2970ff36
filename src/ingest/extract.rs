//! Binary-to-text extraction.
//!
//! Plain text is decoded as UTF-8. PDF content goes through a
//! [`PageExtractor`], whose pages are joined with `--- Page N ---`
//! delimiters so the chunker can attribute chunks to pages.

use std::path::Path;

use crate::error::ExtractionError;

/// Declared content type of an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentType {
    /// `text/plain`.
    PlainText,
    /// `application/pdf`.
    Pdf,
    /// Anything else, kept verbatim for diagnostics.
    Other(String),
}

impl ContentType {
    /// Parses a MIME type string.
    #[must_use]
    pub fn from_mime(mime: &str) -> Self {
        let base = mime.split(';').next().unwrap_or_default().trim();
        match base.to_ascii_lowercase().as_str() {
            "text/plain" | "text/markdown" => Self::PlainText,
            "application/pdf" => Self::Pdf,
            _ => Self::Other(mime.to_string()),
        }
    }

    /// Infers the content type from a file extension.
    ///
    /// `.pdf` is PDF; everything else is treated as plain text.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if is_pdf { Self::Pdf } else { Self::PlainText }
    }

    /// MIME string for this content type.
    #[must_use]
    pub fn as_mime(&self) -> &str {
        match self {
            Self::PlainText => "text/plain",
            Self::Pdf => "application/pdf",
            Self::Other(mime) => mime,
        }
    }
}

/// Opaque PDF collaborator: returns the text of each page in order.
pub trait PageExtractor: Send + Sync {
    /// Extracts per-page text from PDF bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::Pdf`] if the document cannot be parsed.
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError>;
}

/// [`PageExtractor`] backed by the `pdf-extract` crate.
#[cfg(feature = "pdf")]
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractPages;

#[cfg(feature = "pdf")]
impl PageExtractor for PdfExtractPages {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| ExtractionError::Pdf {
            message: e.to_string(),
        })
    }
}

/// The page extractor compiled into this build, if any.
#[must_use]
pub fn default_page_extractor() -> Option<Box<dyn PageExtractor>> {
    #[cfg(feature = "pdf")]
    {
        Some(Box::new(PdfExtractPages))
    }
    #[cfg(not(feature = "pdf"))]
    {
        None
    }
}

/// Formats the delimiter that precedes page `n` (1-based).
#[must_use]
pub fn page_delimiter(n: usize) -> String {
    format!("\n--- Page {n} ---\n")
}

/// Concatenates page texts, each preceded by its page delimiter.
#[must_use]
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let mut text = String::new();
    for (i, page) in pages.iter().enumerate() {
        text.push_str(&page_delimiter(i + 1));
        text.push_str(page.as_ref());
    }
    text
}

/// Decodes plain-text bytes.
///
/// # Errors
///
/// Returns [`ExtractionError::Encoding`] for invalid UTF-8.
pub fn decode_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    Ok(String::from_utf8(bytes.to_vec())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("text/plain", ContentType::PlainText)]
    #[test_case("text/plain; charset=utf-8", ContentType::PlainText)]
    #[test_case("APPLICATION/PDF", ContentType::Pdf)]
    fn test_from_mime(mime: &str, expected: ContentType) {
        assert_eq!(ContentType::from_mime(mime), expected);
    }

    #[test]
    fn test_from_mime_other() {
        let ct = ContentType::from_mime("image/png");
        assert_eq!(ct, ContentType::Other("image/png".to_string()));
        assert_eq!(ct.as_mime(), "image/png");
    }

    #[test_case("paper.pdf", ContentType::Pdf)]
    #[test_case("PAPER.PDF", ContentType::Pdf)]
    #[test_case("notes.txt", ContentType::PlainText)]
    #[test_case("README", ContentType::PlainText)]
    fn test_from_path(name: &str, expected: ContentType) {
        assert_eq!(ContentType::from_path(Path::new(name)), expected);
    }

    #[test]
    fn test_join_pages() {
        let text = join_pages(&["first", "second"]);
        assert_eq!(text, "\n--- Page 1 ---\nfirst\n--- Page 2 ---\nsecond");
    }

    #[test]
    fn test_decode_text_invalid_utf8() {
        let result = decode_text(&[0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(ExtractionError::Encoding(_))));
    }
}
