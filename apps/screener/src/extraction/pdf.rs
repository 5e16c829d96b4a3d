use std::panic::{catch_unwind, AssertUnwindSafe};

use super::ExtractionError;

/// Text layer of every page, concatenated in page order.
///
/// `pdf-extract` can panic on malformed content streams, so the call is
/// isolated and a panic is reported as a parse failure.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::PdfParsing(e.to_string())),
        Err(_) => Err(ExtractionError::PdfParsing(
            "PDF reader panicked on malformed input".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(extract_pdf_text(&[]).is_err());
    }

    #[test]
    fn test_truncated_header_is_an_error() {
        assert!(extract_pdf_text(b"%PDF-1.4\n").is_err());
    }
}
