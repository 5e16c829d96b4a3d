//! Resume text extraction.
//!
//! One reader per supported upload format. Every reader is best-effort:
//! `extract_resume_text` logs failures and hands back empty text so the
//! analysis pipeline always runs.

pub mod docx;
pub mod ocr;
pub mod pdf;

use std::path::Path;

use thiserror::Error;

pub use ocr::{build_ocr_engine, OcrEngine};

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("DOCX parsing failed: {0}")]
    DocxParsing(String),

    #[error("Text encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("OCR engine unavailable: {0}")]
    OcrUnavailable(String),

    #[cfg(feature = "ocr")]
    #[error("OCR processing failed: {0}")]
    OcrProcessing(String),
}

/// Upload formats the screener understands, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
    Image,
}

impl DocumentFormat {
    /// Case-insensitive extension lookup. `None` for anything unsupported.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())?
            .to_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::PlainText),
            "png" | "jpg" | "jpeg" => Some(Self::Image),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::PlainText => "txt",
            Self::Image => "image",
        }
    }
}

/// Reads the text out of an uploaded resume.
///
/// Returns `None` only when the format is unsupported. Reader failures are
/// swallowed and yield `Some(String::new())`.
pub fn extract_resume_text(bytes: &[u8], filename: &str, ocr: &dyn OcrEngine) -> Option<String> {
    let format = DocumentFormat::from_filename(filename)?;

    let result = match format {
        DocumentFormat::Pdf => pdf::extract_pdf_text(bytes),
        DocumentFormat::Docx => docx::extract_docx_text(bytes),
        DocumentFormat::PlainText => extract_plain_text(bytes),
        DocumentFormat::Image => ocr::extract_image_text(bytes, ocr),
    };

    match result {
        Ok(text) => {
            tracing::debug!(
                filename,
                format = format.as_str(),
                chars = text.len(),
                "Extracted resume text"
            );
            Some(text)
        }
        Err(e) => {
            tracing::warn!(filename, format = format.as_str(), "Extraction failed: {e}");
            Some(String::new())
        }
    }
}

fn extract_plain_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    Ok(String::from_utf8(bytes.to_vec())?)
}
