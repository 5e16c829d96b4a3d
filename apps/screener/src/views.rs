//! Server-rendered pages. Templates live in `templates/`.

use askama::Template;

use crate::analysis::ResumeFeatures;
use crate::matching::{JobDescriptionData, MatchBreakdown};
use crate::store::Candidate;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub jd: Option<JobDescriptionData>,
    pub candidate_count: usize,
}

#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultPage {
    pub candidate_id: u32,
    pub filename: String,
    pub resume: ResumeFeatures,
    pub score: Option<MatchBreakdown>,
    pub desired_role: Option<String>,
}

pub struct DashboardRow {
    pub candidate: Candidate,
    pub score: Option<f64>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub rows: Vec<DashboardRow>,
    pub jd: Option<JobDescriptionData>,
}

#[derive(Template)]
#[template(path = "analyze_more.html")]
pub struct AnalyzeMorePage {
    pub candidate_id: u32,
    pub full_text: String,
    pub resume: ResumeFeatures,
    pub score: Option<MatchBreakdown>,
}
