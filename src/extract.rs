//! PDF text extraction using lopdf and pdf-extract.
//!
//! A document goes in as bytes and comes out as one text blob, page text
//! in page order joined with line breaks. Structure checks (encryption,
//! page count) go through `lopdf`; the text itself comes from
//! `pdf-extract`.

use lopdf::Document;
use regex::Regex;
use tracing::debug;

use crate::error::ExtractError;

/// Extract the text content of a PDF document.
///
/// The caller decides what to do with documents that extract to nothing
/// but whitespace.
pub fn extract_text(data: &[u8]) -> Result<String, ExtractError> {
    let mut document = Document::load_mem(data).map_err(|e| ExtractError::Parse(e.to_string()))?;

    // Some tools produce PDFs "encrypted" with an empty password.
    let decrypted;
    let raw: &[u8] = if document.is_encrypted() {
        if document.decrypt("").is_err() {
            return Err(ExtractError::Encrypted);
        }
        debug!("decrypted PDF with empty password");

        let mut buffer = Vec::new();
        document
            .save_to(&mut buffer)
            .map_err(|e| ExtractError::Parse(format!("failed to save decrypted PDF: {e}")))?;
        decrypted = buffer;
        &decrypted
    } else {
        data
    };

    let page_count = document.get_pages().len();
    if page_count == 0 {
        return Err(ExtractError::NoPages);
    }
    debug!(pages = page_count, "loaded PDF");

    let text =
        pdf_extract::extract_text_from_mem(raw).map_err(|e| ExtractError::Text(e.to_string()))?;

    Ok(normalize_text(&text))
}

/// Collapse extraction artifacts: runs of blank lines and repeated spaces.
fn normalize_text(text: &str) -> String {
    let re_newlines = Regex::new(r"\n{3,}").unwrap();
    let re_spaces = Regex::new(r" {2,}").unwrap();

    let cleaned = re_newlines.replace_all(text, "\n\n");
    let cleaned = re_spaces.replace_all(&cleaned, " ");

    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        let input = "Hello   world\n\n\n\nTest";
        let output = normalize_text(input);
        assert_eq!(output, "Hello world\n\nTest");
    }

    #[test]
    fn test_normalize_trims_surrounding_whitespace() {
        assert_eq!(normalize_text("\n\n  page one\n"), "page one");
    }

    #[test]
    fn garbage_bytes_are_a_parse_error() {
        let result = extract_text(b"this is not a PDF");
        assert!(matches!(result, Err(ExtractError::Parse(_))));
    }
}
