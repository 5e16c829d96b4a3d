//! Match scoring: how well a candidate's resume fits the current job description.
//!
//! Algorithm:
//! 1. skills     = matched required skills / required skills (1.0 if none required)
//! 2. experience = min(resume years / max(required years, 1), 1.0)
//! 3. education  = resume degrees found in requirements / required degrees (1.0 if none)
//! 4. role       = sequence similarity of desired vs predicted role (0.0 without a desired role)
//! 5. score      = Σ(weight × sub-score) × 100, rounded to 2 dp

pub mod similarity;

use serde::{Deserialize, Serialize};

use crate::analysis::{clean_text, estimate_experience, extract_education, extract_skills};
use crate::analysis::ResumeFeatures;
use crate::classifier::round2;
use similarity::sequence_ratio;

/// Requirements distilled from a job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptionData {
    pub required_skills: Vec<String>,
    pub min_experience: u32,
    pub required_education: Vec<String>,
    /// Submitted text, kept for display.
    pub raw_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub role: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 0.5,
            experience: 0.3,
            education: 0.1,
            role: 0.1,
        }
    }
}

/// Sub-scores in [0, 1] plus the final percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub skill_score: f64,
    pub experience_score: f64,
    pub education_score: f64,
    pub role_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// 0 to 100, 2 dp
    pub total: f64,
}

/// Extracts requirements from a raw job description.
pub fn parse_job_description(jd_text: &str) -> JobDescriptionData {
    let cleaned = clean_text(jd_text);
    JobDescriptionData {
        required_skills: extract_skills(&cleaned),
        min_experience: estimate_experience(&cleaned),
        required_education: extract_education(&cleaned),
        raw_text: jd_text.trim().to_string(),
    }
}

/// Final match percentage for a resume against a job description.
pub fn compute_match_score(
    resume: &ResumeFeatures,
    jd: &JobDescriptionData,
    desired_role: Option<&str>,
) -> f64 {
    compute_match_breakdown(resume, jd, desired_role, &ScoringWeights::default()).total
}

pub fn compute_match_breakdown(
    resume: &ResumeFeatures,
    jd: &JobDescriptionData,
    desired_role: Option<&str>,
    weights: &ScoringWeights,
) -> MatchBreakdown {
    let (matched_skills, missing_skills): (Vec<String>, Vec<String>) = jd
        .required_skills
        .iter()
        .cloned()
        .partition(|s| resume.skills.contains(s));

    let skill_score = if jd.required_skills.is_empty() {
        1.0
    } else {
        matched_skills.len() as f64 / jd.required_skills.len() as f64
    };

    let experience_score =
        (resume.experience_years as f64 / jd.min_experience.max(1) as f64).min(1.0);

    let education_score = if jd.required_education.is_empty() {
        1.0
    } else {
        let found = resume
            .education
            .iter()
            .filter(|e| jd.required_education.contains(e))
            .count();
        (found as f64 / jd.required_education.len() as f64).min(1.0)
    };

    let role_score = match desired_role.filter(|r| !r.trim().is_empty()) {
        Some(desired) => sequence_ratio(
            &desired.to_lowercase(),
            &resume.predicted_role.to_lowercase(),
        ),
        None => 0.0,
    };

    let total = (skill_score * weights.skills
        + experience_score * weights.experience
        + education_score * weights.education
        + role_score * weights.role)
        * 100.0;

    MatchBreakdown {
        skill_score,
        experience_score,
        education_score,
        role_score,
        matched_skills,
        missing_skills,
        total: round2(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_resume(skills: &[&str], years: u32, education: &[&str], role: &str) -> ResumeFeatures {
        ResumeFeatures {
            text: String::new(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience_years: years,
            education: education.iter().map(|s| s.to_string()).collect(),
            grammar_errors: 0,
            spelling_errors: 0,
            sentiment: 0.0,
            predicted_role: role.to_string(),
            pred_confidence: 90.0,
            top3_roles: vec![],
        }
    }

    fn make_jd(skills: &[&str], years: u32, education: &[&str]) -> JobDescriptionData {
        JobDescriptionData {
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            min_experience: years,
            required_education: education.iter().map(|s| s.to_string()).collect(),
            raw_text: String::new(),
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let w = ScoringWeights::default();
        assert!((w.skills + w.experience + w.education + w.role - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_requirements_give_full_subscores() {
        let resume = make_resume(&[], 0, &[], "HR");
        let jd = make_jd(&[], 0, &[]);
        let b = compute_match_breakdown(&resume, &jd, None, &ScoringWeights::default());
        assert_eq!(b.skill_score, 1.0);
        assert_eq!(b.education_score, 1.0);
        // zero years against max(0, 1) = 1
        assert_eq!(b.experience_score, 0.0);
        assert_eq!(b.role_score, 0.0);
        assert_eq!(b.total, 60.0);
    }

    #[test]
    fn test_partial_skill_match() {
        let resume = make_resume(&["python", "sql"], 5, &["bachelor"], "Data Science");
        let jd = make_jd(&["python", "aws", "sql", "docker"], 5, &["bachelor"]);
        let b = compute_match_breakdown(&resume, &jd, None, &ScoringWeights::default());
        assert_eq!(b.skill_score, 0.5);
        assert_eq!(b.matched_skills, vec!["python", "sql"]);
        assert_eq!(b.missing_skills, vec!["aws", "docker"]);
        // 0.5*0.5 + 1.0*0.3 + 1.0*0.1 = 0.65
        assert_eq!(b.total, 65.0);
    }

    #[test]
    fn test_experience_capped_at_one() {
        let resume = make_resume(&[], 12, &[], "HR");
        let jd = make_jd(&[], 3, &[]);
        let b = compute_match_breakdown(&resume, &jd, None, &ScoringWeights::default());
        assert_eq!(b.experience_score, 1.0);
    }

    #[test]
    fn test_experience_ratio() {
        let resume = make_resume(&[], 2, &[], "HR");
        let jd = make_jd(&[], 4, &[]);
        assert_eq!(
            compute_match_breakdown(&resume, &jd, None, &ScoringWeights::default())
                .experience_score,
            0.5
        );
    }

    #[test]
    fn test_identical_role_adds_ten_points() {
        let resume = make_resume(&["python"], 3, &["master"], "Data Science");
        let jd = make_jd(&["python"], 3, &["master"]);
        let without = compute_match_score(&resume, &jd, None);
        let with = compute_match_score(&resume, &jd, Some("data science"));
        assert_eq!(without, 90.0);
        assert_eq!(with, 100.0);
    }

    #[test]
    fn test_blank_desired_role_counts_as_none() {
        let resume = make_resume(&[], 0, &[], "HR");
        let jd = make_jd(&[], 0, &[]);
        assert_eq!(
            compute_match_score(&resume, &jd, Some("   ")),
            compute_match_score(&resume, &jd, None)
        );
    }

    #[test]
    fn test_desired_role_is_compared_untrimmed() {
        let resume = make_resume(&[], 0, &[], "Data Science");
        let jd = make_jd(&[], 0, &[]);
        let b = compute_match_breakdown(&resume, &jd, Some(" Data Science"), &ScoringWeights::default());
        // 12 matching chars over 13 + 12
        assert!((b.role_score - 0.96).abs() < 1e-12);
        assert!((b.total - 69.6).abs() < 1e-9);
    }

    #[test]
    fn test_education_fraction() {
        let resume = make_resume(&[], 0, &["bachelor", "phd"], "HR");
        let jd = make_jd(&[], 0, &["master", "phd", "mba", "bachelor"]);
        let b = compute_match_breakdown(&resume, &jd, None, &ScoringWeights::default());
        assert_eq!(b.education_score, 0.5);
    }

    #[test]
    fn test_score_bounded() {
        let resume = make_resume(&["python", "java", "sql"], 40, &["phd", "mba"], "Python Developer");
        let jd = make_jd(&["python"], 1, &["phd"]);
        let score = compute_match_score(&resume, &jd, Some("Python Developer"));
        assert!((0.0..=100.0).contains(&score));
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_parse_job_description() {
        let jd = parse_job_description(
            "Backend Engineer\nWe need 4+ years of experience with Python, Docker and AWS.\n\
             A Bachelor degree in CS is required; Master preferred.",
        );
        assert_eq!(jd.required_skills, vec!["python", "aws", "docker"]);
        assert_eq!(jd.min_experience, 4);
        assert_eq!(jd.required_education, vec!["bachelor", "master"]);
        assert!(jd.raw_text.starts_with("Backend Engineer"));
    }
}
