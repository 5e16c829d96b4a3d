// Resume feature extraction.
// Implements: text normalisation, skill/education keywords, experience estimation,
// spelling + grammar counts, sentiment polarity and role prediction.
// Everything here is CPU-bound; handlers call it inside tokio::task::spawn_blocking.

pub mod experience;
pub mod grammar;
pub mod keywords;
pub mod sentiment;
pub mod spelling;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::classifier::{predict_role, RoleClassifier, RolePrediction, RoleScore};
use sentiment::SentimentAnalyzer;
use spelling::SpellChecker;

pub use experience::estimate_experience;
pub use keywords::{extract_education, extract_skills};
pub use text::clean_text;

/// Everything derived from one resume's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeFeatures {
    pub text: String,
    pub skills: Vec<String>,
    pub experience_years: u32,
    pub education: Vec<String>,
    pub grammar_errors: u32,
    pub spelling_errors: u32,
    pub sentiment: f64,
    pub predicted_role: String,
    /// Percentage, 2 dp.
    pub pred_confidence: f64,
    pub top3_roles: Vec<RoleScore>,
}

impl ResumeFeatures {
    pub fn apply_prediction(&mut self, prediction: RolePrediction) {
        self.predicted_role = prediction.role;
        self.pred_confidence = prediction.confidence;
        self.top3_roles = prediction.top3;
    }
}

/// Language resources shared by every analysis: the spelling dictionary and
/// the sentiment lexicon.
#[derive(Debug, Clone, Default)]
pub struct TextAnalyzer {
    pub speller: SpellChecker,
    pub sentiment: SentimentAnalyzer,
}

impl TextAnalyzer {
    pub fn new(speller: SpellChecker) -> Self {
        Self {
            speller,
            sentiment: SentimentAnalyzer::default(),
        }
    }

    /// `(grammar_errors, spelling_errors)`
    pub fn grammar_check(&self, text: &str) -> (u32, u32) {
        (
            grammar::count_grammar_issues(text),
            self.speller.count_misspellings(text),
        )
    }

    pub fn sentiment(&self, text: &str) -> f64 {
        self.sentiment.polarity(text)
    }
}

/// Runs the full feature pipeline over extracted resume text.
pub fn analyze_resume(
    text: String,
    analyzer: &TextAnalyzer,
    classifier: &dyn RoleClassifier,
) -> ResumeFeatures {
    let (grammar_errors, spelling_errors) = analyzer.grammar_check(&text);
    let prediction = predict_role(classifier, &clean_text(&text));

    tracing::debug!(
        backend = classifier.backend(),
        role = %prediction.role,
        confidence = prediction.confidence,
        "Predicted role"
    );

    let mut features = ResumeFeatures {
        skills: extract_skills(&text),
        experience_years: estimate_experience(&text),
        education: extract_education(&text),
        grammar_errors,
        spelling_errors,
        sentiment: analyzer.sentiment(&text),
        predicted_role: String::new(),
        pred_confidence: 0.0,
        top3_roles: vec![],
        text,
    };
    features.apply_prediction(prediction);
    features
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::KeywordRoleClassifier;

    const RESUME: &str = "Jane Doe\n\
        Senior Python Developer with 6+ years of experience.\n\
        Acme Corp 2016 - 2019: built Django and Flask services on AWS.\n\
        Globex 2019 - 2022: excellent results shipping Docker pipelines.\n\
        Education: Bachelor of Technology, MBA.";

    #[test]
    fn test_analyze_resume_end_to_end() {
        let features = analyze_resume(
            RESUME.to_string(),
            &TextAnalyzer::default(),
            &KeywordRoleClassifier::default(),
        );
        assert_eq!(features.skills, vec!["python", "aws", "docker", "flask", "django"]);
        assert_eq!(features.experience_years, 6);
        assert_eq!(features.education, vec!["bachelor", "mba"]);
        assert_eq!(features.predicted_role, "Python Developer");
        assert!(features.pred_confidence > 0.0 && features.pred_confidence <= 100.0);
        assert_eq!(features.top3_roles.len(), 3);
        assert_eq!(features.top3_roles[0].label, features.predicted_role);
        assert!(features.sentiment > 0.0);
        assert_eq!(features.text, RESUME);
    }

    #[test]
    fn test_empty_text_yields_empty_features() {
        let features = analyze_resume(
            String::new(),
            &TextAnalyzer::default(),
            &KeywordRoleClassifier::default(),
        );
        assert!(features.skills.is_empty());
        assert!(features.education.is_empty());
        assert_eq!(features.experience_years, 0);
        assert_eq!(features.grammar_errors, 0);
        assert_eq!(features.spelling_errors, 0);
        assert_eq!(features.sentiment, 0.0);
    }

    #[test]
    fn test_grammar_check_counts_both_kinds() {
        let analyzer = TextAnalyzer::default();
        let (grammar, spelling) = analyzer.grammar_check("Managed the the projcet. shipped it.");
        assert_eq!(grammar, 2);
        assert_eq!(spelling, 1);
    }
}
