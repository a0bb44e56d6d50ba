//! Axum route handlers for shortlist workspaces and the dashboard.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::BearerToken;
use crate::backend::types::{JdPayload, MessageResponse};
use crate::errors::AppError;
use crate::models::parameter::DEFAULT_WEIGHT;
use crate::models::{Candidate, ShortlistSummary};
use crate::state::AppState;
use crate::table::{SortConfig, SortKey};
use crate::workspace::{DetailsUpdate, FilterUpdate, Workspace, WorkspaceSummary};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CreateWorkspaceRequest {
    /// Open a saved shortlist instead of starting an empty draft.
    pub jd_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StageSkillRequest {
    pub name: String,
    /// Range-checked by the workspace so out-of-range values get a
    /// validation error rather than a body-parse rejection.
    #[serde(default = "default_weight")]
    pub weight: i64,
}

fn default_weight() -> i64 {
    i64::from(DEFAULT_WEIGHT)
}

#[derive(Debug, Deserialize)]
pub struct SortRequest {
    /// `null` clears the sort and restores received order.
    pub key: Option<SortKey>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub filename: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_page_size")]
    pub limit: u32,
}

fn default_page_size() -> u32 {
    10
}

#[derive(Debug, Serialize)]
pub struct ConfirmResponse {
    pub message: String,
    pub workspace: Workspace,
}

/// The table as displayed: confirmed skill columns plus the filtered and
/// sorted rows.
#[derive(Debug, Serialize)]
pub struct CandidateTable {
    pub columns: Vec<String>,
    pub total: usize,
    pub matched: usize,
    pub sort: Option<SortConfig>,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub shortlists: Vec<ShortlistSummary>,
    pub drafts: Vec<WorkspaceSummary>,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn caller_id(state: &AppState, token: &BearerToken) -> Result<String, AppError> {
    Ok(state.auth.profile(token.as_str()).await?.user_id)
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Workspace {id} not found"))
}

/// Loads a workspace owned by the caller. Someone else's workspace is
/// reported as missing.
async fn load(state: &AppState, id: Uuid, token: &BearerToken) -> Result<Workspace, AppError> {
    let user_id = caller_id(state, token).await?;
    state
        .drafts
        .load(id)
        .await?
        .filter(|ws| ws.is_owned_by(&user_id))
        .ok_or_else(|| not_found(id))
}

fn candidate_table(workspace: &Workspace) -> CandidateTable {
    let view = workspace.view();
    CandidateTable {
        columns: workspace.confirmed.iter().map(|p| p.name.clone()).collect(),
        total: workspace.shortlist.candidate_count(),
        matched: view.len(),
        sort: workspace.query.sort.clone(),
        candidates: view.into_iter().cloned().collect(),
    }
}

fn attachment_header(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| if c == '"' || c.is_control() { '_' } else { c })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}

// ────────────────────────────────────────────────────────────────────────────
// Workspace lifecycle
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/workspaces
pub async fn handle_create(
    State(state): State<AppState>,
    token: BearerToken,
    Json(request): Json<CreateWorkspaceRequest>,
) -> Result<(StatusCode, Json<Workspace>), AppError> {
    let owner = caller_id(&state, &token).await?;
    let workspace = match request.jd_id {
        Some(jd_id) => {
            let shortlist = state.jd.get(token.as_str(), &jd_id).await?;
            info!(
                "Opened shortlist {jd_id} with {} candidates",
                shortlist.candidate_count()
            );
            Workspace::from_shortlist(shortlist, owner)
        }
        None => Workspace::new(owner),
    };
    state.drafts.save(&workspace).await?;
    Ok((StatusCode::CREATED, Json(workspace)))
}

/// GET /api/v1/workspaces/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    token: BearerToken,
) -> Result<Json<Workspace>, AppError> {
    Ok(Json(load(&state, id, &token).await?))
}

/// DELETE /api/v1/workspaces/:id
pub async fn handle_discard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    token: BearerToken,
) -> Result<StatusCode, AppError> {
    let workspace = load(&state, id, &token).await?;
    if state.drafts.delete(&workspace.owner, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// PATCH /api/v1/workspaces/:id/details
pub async fn handle_update_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    token: BearerToken,
    Json(update): Json<DetailsUpdate>,
) -> Result<Json<Workspace>, AppError> {
    let mut workspace = load(&state, id, &token).await?;
    workspace.update_details(update);
    workspace.touch();
    state.drafts.save(&workspace).await?;
    Ok(Json(workspace))
}

// ────────────────────────────────────────────────────────────────────────────
// Staged parameters and confirmation
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/workspaces/:id/parameters
pub async fn handle_stage_add(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    token: BearerToken,
    Json(request): Json<StageSkillRequest>,
) -> Result<(StatusCode, Json<Workspace>), AppError> {
    let mut workspace = load(&state, id, &token).await?;
    let staged = workspace.stage_add(&request.name, request.weight)?;
    info!("Staged skill '{}' (weight {}) on {id}", staged.name, staged.weight);
    state.drafts.save(&workspace).await?;
    Ok((StatusCode::CREATED, Json(workspace)))
}

/// DELETE /api/v1/workspaces/:id/parameters/:param_id
pub async fn handle_stage_remove(
    State(state): State<AppState>,
    Path((id, param_id)): Path<(Uuid, String)>,
    token: BearerToken,
) -> Result<Json<Workspace>, AppError> {
    let mut workspace = load(&state, id, &token).await?;
    if let Some(removed) = workspace.stage_remove(&param_id) {
        info!("Staged removal of skill '{}' on {id}", removed.name);
        state.drafts.save(&workspace).await?;
    }
    Ok(Json(workspace))
}

/// POST /api/v1/workspaces/:id/confirm
///
/// Applies staged skills to the table, then creates or updates the backend
/// record. Only one confirm per workspace may be in flight.
pub async fn handle_confirm(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    token: BearerToken,
) -> Result<Json<ConfirmResponse>, AppError> {
    let _guard = state.pending_saves.begin(id).ok_or_else(|| {
        AppError::Conflict("A save for this shortlist is already in progress".to_string())
    })?;

    let mut workspace = load(&state, id, &token).await?;
    workspace.confirm()?;
    // The confirmed table is kept even if the backend call below fails.
    workspace.touch();
    state.drafts.save(&workspace).await?;

    let payload = JdPayload {
        job_title: workspace.shortlist.job_title.clone(),
        job_description: workspace.shortlist.job_description.clone(),
        skills: workspace.confirmed.clone(),
    };

    let saved = match workspace.shortlist.id.clone() {
        None => state
            .jd
            .submit(token.as_str(), &payload)
            .await
            .map(|r| (r.message, r.jd_id)),
        Some(jd_id) => state
            .jd
            .update(token.as_str(), &jd_id, &payload)
            .await
            .map(|r| (r.message, None)),
    };

    let (message, jd_id) = saved?;

    // Edits that landed while the backend call was in flight are in the
    // store; only the save bookkeeping is applied on top of them.
    let latest = state.drafts.load(id).await?;
    let discarded = latest.is_none();
    let mut workspace = latest.unwrap_or(workspace);

    if workspace.shortlist.id.is_none() && jd_id.is_none() {
        warn!("Backend accepted shortlist for {id} without returning an id");
    }
    workspace.mark_saved(jd_id);
    if discarded {
        warn!("Workspace {id} was discarded while its save was in flight");
    } else {
        state.drafts.save(&workspace).await?;
    }
    info!(
        "Saved shortlist '{}' ({} skills)",
        workspace.shortlist.title,
        workspace.confirmed.len()
    );
    Ok(Json(ConfirmResponse { message, workspace }))
}

/// POST /api/v1/workspaces/:id/refresh
pub async fn handle_refresh(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    token: BearerToken,
) -> Result<Json<CandidateTable>, AppError> {
    let mut workspace = load(&state, id, &token).await?;
    let jd_id = workspace.shortlist.id.clone().ok_or_else(|| {
        AppError::Validation("Save the shortlist before fetching candidates".to_string())
    })?;

    let record = state.jd.get(token.as_str(), &jd_id).await?;
    info!("Fetched {} candidates for {jd_id}", record.candidate_count());
    workspace.replace_candidates(record.candidates);
    workspace.touch();
    state.drafts.save(&workspace).await?;
    Ok(Json(candidate_table(&workspace)))
}

// ────────────────────────────────────────────────────────────────────────────
// Table
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/v1/workspaces/:id/filters
pub async fn handle_update_filters(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    token: BearerToken,
    Json(update): Json<FilterUpdate>,
) -> Result<Json<CandidateTable>, AppError> {
    let mut workspace = load(&state, id, &token).await?;
    workspace.update_filters(update)?;
    state.drafts.save(&workspace).await?;
    Ok(Json(candidate_table(&workspace)))
}

/// POST /api/v1/workspaces/:id/sort
pub async fn handle_sort(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    token: BearerToken,
    Json(request): Json<SortRequest>,
) -> Result<Json<CandidateTable>, AppError> {
    let mut workspace = load(&state, id, &token).await?;
    match request.key {
        Some(key) => {
            workspace.toggle_sort(key);
        }
        None => workspace.clear_sort(),
    }
    state.drafts.save(&workspace).await?;
    Ok(Json(candidate_table(&workspace)))
}

/// GET /api/v1/workspaces/:id/candidates
pub async fn handle_candidates(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    token: BearerToken,
) -> Result<Json<CandidateTable>, AppError> {
    let workspace = load(&state, id, &token).await?;
    Ok(Json(candidate_table(&workspace)))
}

/// GET /api/v1/workspaces/:id/export
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    token: BearerToken,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let workspace = load(&state, id, &token).await?;
    let export = workspace.export(query.filename.as_deref())?;
    info!("Exported {} rows as {}", workspace.view().len(), export.filename);

    Ok((
        [
            (header::CONTENT_TYPE, export.content_type.to_string()),
            (header::CONTENT_DISPOSITION, attachment_header(&export.filename)),
        ],
        export.body,
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Dashboard
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/shortlists
pub async fn handle_dashboard(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let shortlists = state
        .jd
        .history(token.as_str(), query.skip, query.limit)
        .await?
        .iter()
        .map(|s| s.summary())
        .collect();
    let owner = caller_id(&state, &token).await?;
    let drafts = state
        .drafts
        .list(&owner)
        .await?
        .into_iter()
        .filter(|d| d.is_draft)
        .collect();
    Ok(Json(DashboardResponse { shortlists, drafts }))
}

/// DELETE /api/v1/shortlists/:jd_id
pub async fn handle_delete_shortlist(
    State(state): State<AppState>,
    Path(jd_id): Path<String>,
    token: BearerToken,
) -> Result<Json<MessageResponse>, AppError> {
    let response = state.jd.delete(token.as_str(), &jd_id).await?;
    info!("Deleted shortlist {jd_id}");
    Ok(Json(response))
}
