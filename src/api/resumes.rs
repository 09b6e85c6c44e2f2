//! Resume API endpoints.

use axum::{
    body::Bytes,
    extract::{Path, State},
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;

use super::{created, parse_id, success, ApiResponse, ApiResult};
use crate::errors::AppError;
use crate::models::validation::{apply_update, content_from_create, MAX_JOB_DESCRIPTION_LEN};
use crate::models::{
    AnalyzeRequest, CreateResumeRequest, Resume, ResumeSummary, SessionUser, UpdateResumeRequest,
};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResume {
    pub resume_id: String,
    pub resume_title: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct ResumeList {
    pub count: usize,
    pub resumes: Vec<ResumeSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedResume {
    pub resume_id: String,
    pub resume_title: String,
    pub updated_at: String,
    pub version: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResume {
    pub resume_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultResume {
    pub resume_id: String,
    pub is_default: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeText {
    pub resume_id: String,
    pub text: String,
}

/// Stored scores of an analyzed resume.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub resume_id: String,
    pub resume_title: String,
    pub ats_score: Option<f64>,
    pub formatting_score: Option<f64>,
    pub keyword_score: Option<f64>,
    pub structure_score: Option<f64>,
    pub suggestions: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub strengths: Vec<String>,
    pub last_analyzed: Option<String>,
}

impl From<&Resume> for ScoreReport {
    fn from(resume: &Resume) -> Self {
        Self {
            resume_id: resume.id.clone(),
            resume_title: resume.content.resume_title.clone(),
            ats_score: resume.ats_score,
            formatting_score: resume.formatting_score,
            keyword_score: resume.keyword_score,
            structure_score: resume.structure_score,
            suggestions: resume.ats_suggestions.clone(),
            missing_keywords: resume.missing_keywords.clone(),
            strengths: resume.strengths.clone(),
            last_analyzed: resume.last_analyzed.clone(),
        }
    }
}

/// Result of a fresh analysis.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub scores: ScoreReport,
    pub job_match: Option<serde_json::Value>,
}

/// Response of `GET /resume/{id}/ats-score`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AtsScoreView {
    #[serde(rename_all = "camelCase")]
    Pending {
        resume_id: String,
        ats_score: Option<f64>,
        message: String,
    },
    Scored(ScoreReport),
}

/// POST /resume/create - Create a new resume for the caller.
pub async fn create_resume(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    WithRejection(Json(request), _): WithRejection<Json<CreateResumeRequest>, AppError>,
) -> ApiResult<CreatedResume> {
    let content = content_from_create(request)?;
    let resume = state.repo.create_resume(&user.id, &content).await?;

    tracing::info!("User {} created resume {}", user.id, resume.id);

    created(
        CreatedResume {
            resume_id: resume.id,
            resume_title: resume.content.resume_title,
            created_at: resume.created_at,
        },
        "Resume created successfully",
    )
}

/// GET /resume/list - List the caller's active resumes, newest first.
pub async fn list_resumes(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> ApiResult<ResumeList> {
    let resumes: Vec<ResumeSummary> = state
        .repo
        .list_resumes(&user.id)
        .await?
        .iter()
        .map(Resume::summary)
        .collect();

    success(
        ResumeList {
            count: resumes.len(),
            resumes,
        },
        "Resumes retrieved successfully",
    )
}

/// GET /resume/{id} - Get one of the caller's resumes.
pub async fn get_resume(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<String>,
) -> ApiResult<Resume> {
    let resume = load_owned(&state, &user, &id).await?;
    success(resume, "Resume retrieved successfully")
}

/// PUT /resume/{id} - Partially update a resume.
pub async fn update_resume(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<String>,
    WithRejection(Json(request), _): WithRejection<Json<UpdateResumeRequest>, AppError>,
) -> ApiResult<UpdatedResume> {
    let existing = load_owned(&state, &user, &id).await?;

    let mut content = existing.content;
    apply_update(&mut content, request)?;

    let resume = state
        .repo
        .update_resume(&existing.id, &user.id, &content)
        .await?;

    success(
        UpdatedResume {
            resume_id: resume.id,
            resume_title: resume.content.resume_title,
            updated_at: resume.updated_at,
            version: resume.version,
        },
        "Resume updated successfully",
    )
}

/// DELETE /resume/{id} - Soft-delete a resume.
pub async fn delete_resume(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<String>,
) -> ApiResult<DeletedResume> {
    let id = parse_id(&id)?;
    state.repo.delete_resume(&id, &user.id).await?;

    tracing::info!("User {} deleted resume {}", user.id, id);

    success(
        DeletedResume {
            resume_id: id,
            message: "Resume deleted".to_string(),
        },
        "Resume deleted successfully",
    )
}

/// PUT /resume/{id}/default - Make a resume the caller's default.
pub async fn set_default_resume(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<String>,
) -> ApiResult<DefaultResume> {
    let id = parse_id(&id)?;
    state.repo.set_default_resume(&id, &user.id).await?;

    success(
        DefaultResume {
            resume_id: id,
            is_default: true,
        },
        "Default resume updated successfully",
    )
}

/// GET /resume/{id}/text - Plain-text rendering of a resume.
pub async fn resume_text(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<String>,
) -> ApiResult<ResumeText> {
    let resume = load_owned(&state, &user, &id).await?;

    success(
        ResumeText {
            text: resume.plain_text(),
            resume_id: resume.id,
        },
        "Resume text generated successfully",
    )
}

/// POST /resume/{id}/analyze - Score a resume with the ATS analyzer.
///
/// The body is optional. On analyzer failure the stored scores are left as
/// they were.
pub async fn analyze_resume(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<AnalysisReport> {
    let request: AnalyzeRequest = if body.iter().all(u8::is_ascii_whitespace) {
        AnalyzeRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))?
    };

    let resume = load_owned(&state, &user, &id).await?;

    let job_description = request
        .job_description
        .filter(|jd| !jd.trim().is_empty())
        .or_else(|| resume.content.job_description.clone())
        .unwrap_or_default();
    if job_description.chars().count() > MAX_JOB_DESCRIPTION_LEN {
        return Err(AppError::Validation(format!(
            "jobDescription must be at most {MAX_JOB_DESCRIPTION_LEN} characters"
        )));
    }

    let resume_data = serde_json::to_value(&resume)?;
    let analysis = state
        .ats
        .analyze(&resume_data, &job_description)
        .await
        .map_err(|e| {
            tracing::error!("ATS analysis of resume {} failed: {}", resume.id, e);
            AppError::AtsUnavailable
        })?;

    let saved = state
        .repo
        .save_analysis(&resume.id, &user.id, &analysis)
        .await?;

    tracing::info!(
        "Resume {} analyzed: ats_score={}",
        saved.id,
        analysis.ats_score
    );

    success(
        AnalysisReport {
            scores: ScoreReport::from(&saved),
            job_match: analysis.job_match,
        },
        "Resume analyzed successfully",
    )
}

/// GET /resume/{id}/ats-score - Current scores of a resume.
pub async fn get_ats_score(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<String>,
) -> ApiResult<AtsScoreView> {
    let resume = load_owned(&state, &user, &id).await?;

    if resume.ats_score.is_none() {
        return Ok(ApiResponse::new(
            AtsScoreView::Pending {
                resume_id: resume.id,
                ats_score: None,
                message: "Resume has not been analyzed yet".to_string(),
            },
            "Resume not yet analyzed",
        ));
    }

    success(
        AtsScoreView::Scored(ScoreReport::from(&resume)),
        "ATS score retrieved successfully",
    )
}

async fn load_owned(
    state: &AppState,
    user: &SessionUser,
    raw_id: &str,
) -> Result<Resume, AppError> {
    let id = parse_id(raw_id)?;
    state
        .repo
        .get_resume(&id, &user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))
}
