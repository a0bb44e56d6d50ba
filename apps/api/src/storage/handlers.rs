use axum::extract::{Multipart, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use crate::auth::BearerToken;
use crate::errors::AppError;
use crate::state::AppState;
use crate::storage::resume_key;

const FILES_FIELD: &str = "files";

#[derive(Debug, Serialize)]
pub struct UploadResult {
    pub name: String,
    pub success: bool,
    pub url: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub uploads: Vec<UploadResult>,
}

/// POST /api/v1/resumes
///
/// Multipart upload; every `files` part is stored separately and reported
/// on its own, so one bad file does not fail the batch.
pub async fn handle_upload(
    State(state): State<AppState>,
    _token: BearerToken,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let store = state
        .resumes
        .clone()
        .ok_or_else(|| AppError::Unavailable("Resume storage is not configured".to_string()))?;

    let mut uploads = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or("resume").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let body = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read '{name}': {e}")))?;

        let key = resume_key(Utc::now().timestamp_millis(), &name);
        let result = match store.put(&key, &content_type, body).await {
            Ok(url) => UploadResult {
                name,
                success: true,
                url: Some(url),
                error: None,
            },
            Err(e) => {
                warn!("Resume upload failed: {e}");
                UploadResult {
                    name,
                    success: false,
                    url: None,
                    error: Some(e.to_string()),
                }
            }
        };
        uploads.push(result);
    }

    if uploads.is_empty() {
        return Err(AppError::Validation(format!(
            "No '{FILES_FIELD}' parts in upload"
        )));
    }

    Ok(Json(UploadResponse { uploads }))
}
