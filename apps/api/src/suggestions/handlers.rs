use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub skills: Vec<String>,
}

/// POST /api/v1/suggestions
pub async fn handle_suggest(
    State(state): State<AppState>,
    Json(request): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    let skills = state.suggester.suggest(&request.job_description).await?;
    Ok(Json(SuggestResponse { skills }))
}
