//! Skill search and suggestion endpoints.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::SessionUser;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SkillSearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SkillSearchResults {
    pub results: Vec<String>,
    pub query: String,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionParams {
    #[serde(default)]
    pub job_title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SkillSuggestions {
    pub suggestions: Vec<String>,
    pub count: usize,
    pub categories: Vec<String>,
}

/// POST /resume/skills/search - Autocomplete against the skill catalog.
pub async fn search_skills(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<SkillSearchRequest>, AppError>,
) -> ApiResult<SkillSearchResults> {
    let query = request.query.unwrap_or_default();
    if query.trim().is_empty() {
        return Err(AppError::EmptyQuery);
    }

    let results = state.skills.search(query.trim());
    success(
        SkillSearchResults {
            count: results.len(),
            results,
            query,
        },
        "Skills search completed successfully",
    )
}

/// GET /resume/skills/suggestions - Skills for a job title and the caller's past roles.
pub async fn skill_suggestions(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Query(params): Query<SuggestionParams>,
) -> ApiResult<SkillSuggestions> {
    let resumes = state.repo.list_resumes(&user.id).await?;

    let titles = params.job_title.iter().map(String::as_str).chain(
        resumes
            .iter()
            .flat_map(|r| r.content.experience.iter())
            .map(|exp| exp.job_title.as_str()),
    );
    let suggestions = state.skills.suggestions(titles);

    success(
        SkillSuggestions {
            count: suggestions.len(),
            suggestions,
            categories: state.skills.categories(),
        },
        "Skill suggestions retrieved successfully",
    )
}
