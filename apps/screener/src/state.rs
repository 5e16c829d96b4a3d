use std::sync::Arc;

use crate::analysis::TextAnalyzer;
use crate::classifier::RoleClassifier;
use crate::config::Config;
use crate::extraction::OcrEngine;
use crate::store::CandidateStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<CandidateStore>,
    /// Spelling dictionary and sentiment lexicon.
    pub analyzer: Arc<TextAnalyzer>,
    /// Pluggable role classifier. Default: JSON artifact at MODEL_PATH, else keyword profiles.
    pub classifier: Arc<dyn RoleClassifier>,
    /// Tesseract when built with the `ocr` feature, otherwise a no-op engine.
    pub ocr: Arc<dyn OcrEngine>,
}
