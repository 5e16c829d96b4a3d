//! Axum route handlers for the screener pages.

use askama::Template;
use axum::{
    extract::{Multipart, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::analysis::{analyze_resume, clean_text, ResumeFeatures};
use crate::classifier::predict_role;
use crate::errors::AppError;
use crate::extraction::extract_resume_text;
use crate::matching::{
    compute_match_breakdown, compute_match_score, parse_job_description, JobDescriptionData,
    MatchBreakdown, ScoringWeights,
};
use crate::state::AppState;
use crate::views::{AnalyzeMorePage, DashboardPage, DashboardRow, IndexPage, ResultPage};

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JobDescriptionForm {
    pub jd_text: Option<String>,
}

/// Fields of the resume upload form.
#[derive(Debug, Default)]
struct UploadForm {
    filename: String,
    bytes: Vec<u8>,
    desired_role: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET / and GET /upload_page
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render_index(&state).await
}

/// POST /
///
/// Replaces the job description when `jd_text` is non-blank, then re-renders
/// the index.
pub async fn submit_job_description(
    State(state): State<AppState>,
    Form(form): Form<JobDescriptionForm>,
) -> Result<Html<String>, AppError> {
    match form.jd_text.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => {
            state
                .store
                .set_job_description(parse_job_description(text))
                .await;
        }
        _ => tracing::debug!("Ignoring blank job description submission"),
    }
    render_index(&state).await
}

/// POST /upload
///
/// Extracts and analyses the resume, stores the candidate and renders the
/// result page. A missing file or unsupported format sends the user back to
/// the upload page.
pub async fn upload_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = read_upload_form(multipart).await?;
    if form.filename.is_empty() {
        return Ok(Redirect::to("/upload_page").into_response());
    }

    let UploadForm {
        filename,
        bytes,
        desired_role,
    } = form;

    let resume = {
        let state = state.clone();
        let filename = filename.clone();
        tokio::task::spawn_blocking(move || {
            let text = extract_resume_text(&bytes, &filename, state.ocr.as_ref())?;
            Some(analyze_resume(
                text,
                &state.analyzer,
                state.classifier.as_ref(),
            ))
        })
        .await?
    };

    let Some(resume) = resume else {
        tracing::info!(filename = %filename, "Rejected upload with unsupported format");
        return Ok(Redirect::to("/upload_page").into_response());
    };

    let candidate = state.store.add(filename, resume).await;
    let jd = state.store.job_description().await;

    let page = ResultPage {
        candidate_id: candidate.id,
        score: breakdown(&candidate.resume, jd.as_ref(), desired_role.as_deref()),
        filename: candidate.filename,
        resume: candidate.resume,
        desired_role,
    };
    Ok(Html(page.render()?).into_response())
}

/// GET /dashboard
///
/// Every candidate with its match score against the current job description.
pub async fn dashboard(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let jd = state.store.job_description().await;
    let rows = state
        .store
        .list()
        .await
        .into_iter()
        .map(|candidate| DashboardRow {
            score: jd
                .as_ref()
                .map(|jd| compute_match_score(&candidate.resume, jd, None)),
            candidate,
        })
        .collect();

    Ok(Html(DashboardPage { rows, jd }.render()?))
}

/// GET /candidate/:id
///
/// Re-runs role prediction on the stored text and keeps the refreshed
/// prediction on the candidate.
pub async fn candidate_detail(
    State(state): State<AppState>,
    Path(candidate_id): Path<u32>,
) -> Result<Response, AppError> {
    let Some(candidate) = state.store.get(candidate_id).await else {
        return Ok(Redirect::to("/dashboard").into_response());
    };

    let prediction = {
        let classifier = state.classifier.clone();
        let text = candidate.full_text().to_string();
        tokio::task::spawn_blocking(move || predict_role(classifier.as_ref(), &clean_text(&text)))
            .await?
    };

    let Some(candidate) = state.store.update_prediction(candidate_id, prediction).await else {
        return Ok(Redirect::to("/dashboard").into_response());
    };
    let jd = state.store.job_description().await;

    let page = ResultPage {
        candidate_id: candidate.id,
        score: breakdown(&candidate.resume, jd.as_ref(), None),
        filename: candidate.filename,
        resume: candidate.resume,
        desired_role: None,
    };
    Ok(Html(page.render()?).into_response())
}

/// GET /analyze_more/:id
///
/// Recomputes every feature from the stored text and shows it alongside the
/// full extracted text. The stored candidate is left untouched.
pub async fn analyze_more(
    State(state): State<AppState>,
    Path(candidate_id): Path<u32>,
) -> Result<Response, AppError> {
    let Some(candidate) = state.store.get(candidate_id).await else {
        return Ok(Redirect::to("/dashboard").into_response());
    };

    let full_text = candidate.full_text().to_string();
    let resume = {
        let state = state.clone();
        let text = full_text.clone();
        tokio::task::spawn_blocking(move || {
            analyze_resume(text, &state.analyzer, state.classifier.as_ref())
        })
        .await?
    };
    let jd = state.store.job_description().await;

    let page = AnalyzeMorePage {
        candidate_id,
        score: breakdown(&resume, jd.as_ref(), None),
        full_text,
        resume,
    };
    Ok(Html(page.render()?).into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn render_index(state: &AppState) -> Result<Html<String>, AppError> {
    let page = IndexPage {
        jd: state.store.job_description().await,
        candidate_count: state.store.len().await,
    };
    Ok(Html(page.render()?))
}

fn breakdown(
    resume: &ResumeFeatures,
    jd: Option<&JobDescriptionData>,
    desired_role: Option<&str>,
) -> Option<MatchBreakdown> {
    jd.map(|jd| compute_match_breakdown(resume, jd, desired_role, &ScoringWeights::default()))
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed upload: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "resume_file" => {
                form.filename = field.file_name().unwrap_or("").to_string();
                form.bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read resume file: {e}")))?
                    .to_vec();
            }
            "desired_role" => {
                let role = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read desired role: {e}")))?;
                if !role.trim().is_empty() {
                    form.desired_role = Some(role);
                }
            }
            _ => {
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Malformed upload: {e}")))?;
            }
        }
    }
    Ok(form)
}
