//! TF-IDF + linear classifier evaluated from a JSON artifact.
//!
//! The artifact is produced offline by whatever trains the model; this crate
//! only loads and evaluates it:
//!
//! ```json
//! {
//!   "labels": ["Data Science", "HR"],
//!   "vocabulary": {"python": 0, "recruiting": 1},
//!   "idf": [1.4, 2.1],
//!   "coef": [[2.3, -1.0], [-2.3, 1.0]],
//!   "intercept": [0.1, -0.1],
//!   "ngram_max": 1,
//!   "sublinear_tf": false
//! }
//! ```
//!
//! Two labels with a single `coef` row is read as a binary logistic model
//! (the row scores the second label). Anything else is multinomial softmax.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use super::RoleClassifier;

/// Tokens of two or more word characters.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("Failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model artifact is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Model artifact is inconsistent: {0}")]
    Shape(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    pub labels: Vec<String>,
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    #[serde(default = "default_ngram_max")]
    pub ngram_max: usize,
    #[serde(default)]
    pub sublinear_tf: bool,
}

fn default_ngram_max() -> usize {
    1
}

#[derive(Debug, Clone)]
pub struct LinearRoleClassifier {
    artifact: ModelArtifact,
}

impl LinearRoleClassifier {
    pub fn from_path(path: &Path) -> Result<Self, ModelLoadError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ModelLoadError> {
        let artifact: ModelArtifact = serde_json::from_str(raw)?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelLoadError> {
        validate(&artifact)?;
        Ok(Self { artifact })
    }

    fn is_binary(&self) -> bool {
        self.artifact.labels.len() == 2 && self.artifact.coef.len() == 1
    }

    /// L2-normalised TF-IDF vector as sparse (feature index, weight) pairs.
    fn vectorize(&self, text: &str) -> Vec<(usize, f64)> {
        let tokens: Vec<&str> = TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect();

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for n in 1..=self.artifact.ngram_max {
            for gram in tokens.windows(n) {
                let term = gram.join(" ");
                if let Some(&idx) = self.artifact.vocabulary.get(&term) {
                    *counts.entry(idx).or_insert(0.0) += 1.0;
                }
            }
        }

        let mut features: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, tf)| {
                let tf = if self.artifact.sublinear_tf {
                    1.0 + tf.ln()
                } else {
                    tf
                };
                (idx, tf * self.artifact.idf[idx])
            })
            .collect();

        let norm = features.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut features {
                *w /= norm;
            }
        }
        features
    }
}

impl RoleClassifier for LinearRoleClassifier {
    fn labels(&self) -> &[String] {
        &self.artifact.labels
    }

    fn predict_proba(&self, cleaned_text: &str) -> Vec<f64> {
        let features = self.vectorize(cleaned_text);
        let scores: Vec<f64> = self
            .artifact
            .coef
            .iter()
            .zip(&self.artifact.intercept)
            .map(|(row, bias)| bias + features.iter().map(|(i, w)| row[*i] * w).sum::<f64>())
            .collect();

        if self.is_binary() {
            let p = sigmoid(scores[0]);
            return vec![1.0 - p, p];
        }
        softmax(&scores)
    }

    fn backend(&self) -> &'static str {
        "linear"
    }
}

fn validate(a: &ModelArtifact) -> Result<(), ModelLoadError> {
    let shape = |msg: String| Err(ModelLoadError::Shape(msg));

    if a.labels.is_empty() {
        return shape("no labels".to_string());
    }
    if a.ngram_max == 0 {
        return shape("ngram_max must be at least 1".to_string());
    }
    let rows_expected = if a.labels.len() == 2 && a.coef.len() == 1 {
        1
    } else {
        a.labels.len()
    };
    if a.coef.len() != rows_expected {
        return shape(format!(
            "{} coef rows for {} labels",
            a.coef.len(),
            a.labels.len()
        ));
    }
    if a.intercept.len() != a.coef.len() {
        return shape(format!(
            "{} intercepts for {} coef rows",
            a.intercept.len(),
            a.coef.len()
        ));
    }
    let n_features = a.idf.len();
    if let Some((term, idx)) = a.vocabulary.iter().find(|(_, idx)| **idx >= n_features) {
        return shape(format!(
            "vocabulary term '{term}' maps to index {idx} but there are {n_features} idf weights"
        ));
    }
    if let Some(row) = a.coef.iter().position(|row| row.len() != n_features) {
        return shape(format!(
            "coef row {row} has {} weights, expected {n_features}",
            a.coef[row].len()
        ));
    }
    Ok(())
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
