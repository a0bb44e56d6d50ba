use std::sync::Arc;

use crate::backend::{AuthApi, JdApi};
use crate::storage::ResumeStore;
use crate::suggestions::SkillSuggester;
use crate::workspace::pending::PendingSaves;
use crate::workspace::store::DraftStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every collaborator sits behind a trait object so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthApi>,
    pub jd: Arc<dyn JdApi>,
    pub suggester: Arc<dyn SkillSuggester>,
    pub drafts: Arc<dyn DraftStore>,
    /// `None` when object storage is not configured; uploads answer 503.
    pub resumes: Option<Arc<dyn ResumeStore>>,
    pub pending_saves: PendingSaves,
}
