use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::analysis::ResumeFeatures;
use crate::classifier::RolePrediction;
use crate::matching::JobDescriptionData;

/// One uploaded resume. Lives until the process exits.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub id: u32,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    pub resume: ResumeFeatures,
}

impl Candidate {
    /// Raw text extracted at upload time.
    pub fn full_text(&self) -> &str {
        &self.resume.text
    }
}

/// In-memory candidate list plus the job description currently screened for.
///
/// Ids are 1-based and assigned in upload order under the write lock.
#[derive(Debug, Default)]
pub struct CandidateStore {
    candidates: RwLock<Vec<Candidate>>,
    job_description: RwLock<Option<JobDescriptionData>>,
}

impl CandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, filename: String, resume: ResumeFeatures) -> Candidate {
        let mut candidates = self.candidates.write().await;
        let candidate = Candidate {
            id: candidates.len() as u32 + 1,
            filename,
            uploaded_at: Utc::now(),
            resume,
        };
        candidates.push(candidate.clone());
        tracing::info!(
            candidate_id = candidate.id,
            role = %candidate.resume.predicted_role,
            "Stored candidate"
        );
        candidate
    }

    pub async fn get(&self, id: u32) -> Option<Candidate> {
        self.candidates
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub async fn list(&self) -> Vec<Candidate> {
        self.candidates.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.candidates.read().await.len()
    }

    /// Replaces a candidate's stored role prediction. Returns the updated
    /// candidate, or `None` for an unknown id.
    pub async fn update_prediction(&self, id: u32, prediction: RolePrediction) -> Option<Candidate> {
        let mut candidates = self.candidates.write().await;
        let candidate = candidates.iter_mut().find(|c| c.id == id)?;
        candidate.resume.apply_prediction(prediction);
        Some(candidate.clone())
    }

    pub async fn job_description(&self) -> Option<JobDescriptionData> {
        self.job_description.read().await.clone()
    }

    /// Overwrites the current job description.
    pub async fn set_job_description(&self, jd: JobDescriptionData) {
        tracing::info!(
            skills = ?jd.required_skills,
            min_experience = jd.min_experience,
            education = ?jd.required_education,
            "Job description updated"
        );
        *self.job_description.write().await = Some(jd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::RoleScore;

    fn features(role: &str) -> ResumeFeatures {
        ResumeFeatures {
            text: format!("{role} resume"),
            skills: vec![],
            experience_years: 0,
            education: vec![],
            grammar_errors: 0,
            spelling_errors: 0,
            sentiment: 0.0,
            predicted_role: role.to_string(),
            pred_confidence: 50.0,
            top3_roles: vec![],
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_from_one() {
        let store = CandidateStore::new();
        let a = store.add("a.txt".into(), features("HR")).await;
        let b = store.add("b.txt".into(), features("Sales")).await;
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.len().await, 2);
        let ids: Vec<u32> = store.list().await.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_get_unknown_is_none() {
        let store = CandidateStore::new();
        store.add("a.txt".into(), features("HR")).await;
        assert!(store.get(2).await.is_none());
        assert_eq!(store.get(1).await.unwrap().full_text(), "HR resume");
    }

    #[tokio::test]
    async fn test_update_prediction_persists() {
        let store = CandidateStore::new();
        store.add("a.txt".into(), features("HR")).await;
        let prediction = RolePrediction {
            role: "Sales".to_string(),
            confidence: 77.5,
            top3: vec![RoleScore {
                label: "Sales".to_string(),
                percent: 77.5,
            }],
        };
        let updated = store.update_prediction(1, prediction.clone()).await.unwrap();
        assert_eq!(updated.resume.predicted_role, "Sales");
        assert_eq!(store.get(1).await.unwrap().resume.pred_confidence, 77.5);
        assert!(store.update_prediction(9, prediction).await.is_none());
    }

    #[tokio::test]
    async fn test_job_description_is_overwritten() {
        let store = CandidateStore::new();
        assert!(store.job_description().await.is_none());
        store
            .set_job_description(JobDescriptionData {
                min_experience: 2,
                ..Default::default()
            })
            .await;
        store
            .set_job_description(JobDescriptionData {
                min_experience: 5,
                ..Default::default()
            })
            .await;
        assert_eq!(store.job_description().await.unwrap().min_experience, 5);
    }

    #[tokio::test]
    async fn test_concurrent_adds_get_unique_ids() {
        let store = std::sync::Arc::new(CandidateStore::new());
        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.add(format!("{i}.txt"), features("HR")).await.id
            }));
        }
        let mut ids = Vec::new();
        for h in handles {
            ids.push(h.await.unwrap());
        }
        ids.sort();
        assert_eq!(ids, (1..=20).collect::<Vec<u32>>());
    }
}
