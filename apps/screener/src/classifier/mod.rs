//! Role classification: a pluggable predictor of a resume's job role.
//!
//! Default: `LinearRoleClassifier` loaded from a JSON model artifact.
//! Fallback: `KeywordRoleClassifier` (built-in profiles) when no artifact is configured.
//!
//! `AppState` holds an `Arc<dyn RoleClassifier>`, chosen at startup via config.

pub mod keyword;
pub mod linear;

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use keyword::KeywordRoleClassifier;
pub use linear::{LinearRoleClassifier, ModelLoadError};

/// A role label with its probability as a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleScore {
    pub label: String,
    pub percent: f64,
}

/// Outcome of running the classifier over one resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolePrediction {
    pub role: String,
    /// Probability of `role`, as a percentage rounded to 2 dp.
    pub confidence: f64,
    /// Up to three most probable roles, highest first.
    pub top3: Vec<RoleScore>,
}

/// The role classifier trait. Implement this to swap backends without
/// touching the analysis pipeline or the handlers.
pub trait RoleClassifier: Send + Sync {
    /// Class labels, in the order `predict_proba` reports them.
    fn labels(&self) -> &[String];

    /// Probability of every label for already-cleaned text. Sums to 1 when
    /// there is at least one label.
    fn predict_proba(&self, cleaned_text: &str) -> Vec<f64>;

    /// Backend name, for logs.
    fn backend(&self) -> &'static str;
}

/// Runs the classifier and condenses its distribution into a prediction.
///
/// The winning label is the first maximum in label order. Ties in the top-3
/// list keep label order.
pub fn predict_role(classifier: &dyn RoleClassifier, cleaned_text: &str) -> RolePrediction {
    let labels = classifier.labels();
    let probs = classifier.predict_proba(cleaned_text);

    let mut ranked: Vec<(usize, f64)> = probs
        .iter()
        .copied()
        .enumerate()
        .take(labels.len())
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let Some(&(best, best_p)) = ranked.first() else {
        return RolePrediction {
            role: "Unknown".to_string(),
            confidence: 0.0,
            top3: vec![],
        };
    };

    RolePrediction {
        role: labels[best].clone(),
        confidence: round2(best_p * 100.0),
        top3: ranked
            .iter()
            .take(3)
            .map(|&(i, p)| RoleScore {
                label: labels[i].clone(),
                percent: round2(p * 100.0),
            })
            .collect(),
    }
}

/// Picks the classifier backend for this process.
///
/// A configured artifact that fails to load is a startup error rather than a
/// silent downgrade.
pub fn load_classifier(model_path: Option<&Path>) -> Result<Arc<dyn RoleClassifier>, ModelLoadError> {
    match model_path {
        Some(path) => {
            let model = LinearRoleClassifier::from_path(path)?;
            tracing::info!(
                path = %path.display(),
                labels = model.labels().len(),
                "Loaded role classifier artifact"
            );
            Ok(Arc::new(model))
        }
        None => {
            tracing::warn!("MODEL_PATH not set, using built-in keyword role classifier");
            Ok(Arc::new(KeywordRoleClassifier::default()))
        }
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
