use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use image::ImageFormat;

use super::ExtractionError;

/// Recognises text in a PNG-encoded RGB image.
///
/// Carried in `AppState` as `Arc<dyn OcrEngine>`; the engine is chosen once
/// at startup by `build_ocr_engine`.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, png_bytes: &[u8]) -> Result<String, ExtractionError>;

    fn name(&self) -> &'static str;
}

/// Stand-in when the binary is built without the `ocr` feature or Tesseract
/// could not be initialised. Image resumes then extract as empty text.
pub struct DisabledOcr;

impl OcrEngine for DisabledOcr {
    fn recognize(&self, _png_bytes: &[u8]) -> Result<String, ExtractionError> {
        Err(ExtractionError::OcrUnavailable(
            "built without the `ocr` feature".to_string(),
        ))
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Tesseract OCR with English traineddata.
#[cfg(feature = "ocr")]
pub struct TesseractOcr {
    tessdata_dir: Option<String>,
}

#[cfg(feature = "ocr")]
impl TesseractOcr {
    pub fn new(tessdata_dir: Option<&Path>) -> Result<Self, ExtractionError> {
        let tessdata_dir = match tessdata_dir {
            Some(dir) => {
                if !dir.join("eng.traineddata").exists() {
                    return Err(ExtractionError::OcrUnavailable(format!(
                        "eng.traineddata not found in {}",
                        dir.display()
                    )));
                }
                Some(
                    dir.to_str()
                        .ok_or_else(|| {
                            ExtractionError::OcrUnavailable("invalid tessdata path".to_string())
                        })?
                        .to_string(),
                )
            }
            None => None,
        };
        Ok(Self { tessdata_dir })
    }
}

#[cfg(feature = "ocr")]
impl OcrEngine for TesseractOcr {
    fn recognize(&self, png_bytes: &[u8]) -> Result<String, ExtractionError> {
        let tess = tesseract::Tesseract::new(self.tessdata_dir.as_deref(), Some("eng"))
            .map_err(|e| ExtractionError::OcrUnavailable(format!("{e:?}")))?;

        let mut tess = tess
            .set_image_from_mem(png_bytes)
            .map_err(|e| ExtractionError::OcrProcessing(format!("{e:?}")))?;

        tess.get_text()
            .map_err(|e| ExtractionError::OcrProcessing(format!("{e:?}")))
    }

    fn name(&self) -> &'static str {
        "tesseract"
    }
}

/// Picks the OCR backend for this build.
#[cfg(feature = "ocr")]
pub fn build_ocr_engine(tessdata_dir: Option<&Path>) -> Arc<dyn OcrEngine> {
    match TesseractOcr::new(tessdata_dir) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            tracing::warn!("Tesseract unavailable, image resumes will extract as empty: {e}");
            Arc::new(DisabledOcr)
        }
    }
}

/// Picks the OCR backend for this build.
#[cfg(not(feature = "ocr"))]
pub fn build_ocr_engine(tessdata_dir: Option<&Path>) -> Arc<dyn OcrEngine> {
    if tessdata_dir.is_some() {
        tracing::warn!("TESSDATA_DIR is set but the binary was built without the `ocr` feature");
    }
    Arc::new(DisabledOcr)
}

/// Decodes an uploaded image, normalises it to RGB and runs OCR over it.
/// Recognised lines are joined with single spaces.
pub fn extract_image_text(bytes: &[u8], engine: &dyn OcrEngine) -> Result<String, ExtractionError> {
    let rgb = image::load_from_memory(bytes)?.to_rgb8();

    let mut png = Cursor::new(Vec::new());
    rgb.write_to(&mut png, ImageFormat::Png)?;

    let raw = engine.recognize(png.get_ref())?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// OCR stub that returns canned output and checks it was handed a PNG.
    struct MockOcr {
        text: String,
    }

    impl OcrEngine for MockOcr {
        fn recognize(&self, png_bytes: &[u8]) -> Result<String, ExtractionError> {
            assert!(png_bytes.starts_with(&[0x89, b'P', b'N', b'G']));
            Ok(self.text.clone())
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }

    fn tiny_png() -> Vec<u8> {
        let img = RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_lines_are_joined_with_spaces() {
        let engine = MockOcr {
            text: "Jane Doe\n\n  Python Developer \nAWS\n".to_string(),
        };
        let text = extract_image_text(&tiny_png(), &engine).unwrap();
        assert_eq!(text, "Jane Doe Python Developer AWS");
    }

    #[test]
    fn test_undecodable_image_is_an_error() {
        let engine = MockOcr {
            text: "unused".to_string(),
        };
        assert!(extract_image_text(b"not an image", &engine).is_err());
    }

    #[test]
    fn test_disabled_engine_reports_unavailable() {
        let err = extract_image_text(&tiny_png(), &DisabledOcr).unwrap_err();
        assert!(matches!(err, ExtractionError::OcrUnavailable(_)));
    }
}
