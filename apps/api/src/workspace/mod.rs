//! Shortlist workspace: the working copy of a shortlist plus the confirmed
//! parameter snapshot and table state that drive what the user sees.
//!
//! Staged parameter edits (`Shortlist::parameters`) never touch the table.
//! Only `confirm` copies them into `confirmed`, which is the single point
//! where table columns and skill filters change.

pub mod handlers;
pub mod pending;
pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Candidate, Shortlist, SkillParameter};
use crate::table::{
    export_csv, reconcile_skill_filters, CsvExport, ExportError, SkillFilter, SortConfig, SortKey,
    TableQuery,
};

#[derive(Debug, Error, PartialEq)]
pub enum WorkspaceError {
    #[error("Skill name cannot be empty.")]
    BlankSkillName,

    #[error("Skill \"{0}\" already exists in the staged list.")]
    DuplicateSkill(String),

    #[error("Skill weight must be between 1 and 10, got {0}.")]
    WeightOutOfRange(i64),

    #[error("Please provide a Shortlist Title and Job Title before saving.")]
    MissingTitle,

    #[error("No confirmed skill named \"{0}\".")]
    UnknownSkillFilter(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: Uuid,
    /// `user_id` of the account that created the workspace. Only that user
    /// can see or change it.
    pub owner: String,
    /// Working copy. Its `parameters` are the staged list.
    pub shortlist: Shortlist,
    pub confirmed: Vec<SkillParameter>,
    pub query: TableQuery,
}

/// Draft list entry for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSummary {
    pub workspace_id: Uuid,
    pub jd_id: Option<String>,
    pub title: String,
    pub job_title: String,
    pub candidate_count: usize,
    pub last_modified: DateTime<Utc>,
    pub is_draft: bool,
}

/// Partial update of the free-text shortlist fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailsUpdate {
    pub title: Option<String>,
    pub job_title: Option<String>,
    pub job_description: Option<String>,
}

/// Partial update of the table filters. Skill thresholds are keyed by
/// confirmed skill name; `null` clears a threshold.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterUpdate {
    pub search: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub min_overall: Option<Option<f64>>,
    #[serde(default)]
    pub skill_filters: Vec<SkillFilter>,
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Some)
}

impl Workspace {
    /// An empty draft.
    pub fn new(owner: impl Into<String>) -> Self {
        Self::from_shortlist(Shortlist::draft(), owner)
    }

    /// Opens an existing shortlist. Its parameters count as confirmed
    /// straight away so the table shows the saved columns.
    pub fn from_shortlist(shortlist: Shortlist, owner: impl Into<String>) -> Self {
        let mut workspace = Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            confirmed: Vec::new(),
            shortlist,
            query: TableQuery::default(),
        };
        workspace.on_confirmed_parameters_changed(workspace.shortlist.parameters.clone());
        workspace
    }

    pub fn staged(&self) -> &[SkillParameter] {
        &self.shortlist.parameters
    }

    pub fn skill_filters(&self) -> &[SkillFilter] {
        &self.query.filter.skill_filters
    }

    /// Appends a skill to the staged list. The table is unaffected until
    /// `confirm`.
    pub fn stage_add(&mut self, name: &str, weight: i64) -> Result<&SkillParameter, WorkspaceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WorkspaceError::BlankSkillName);
        }
        let weight = u8::try_from(weight)
            .ok()
            .filter(|w| SkillParameter::weight_in_range(*w))
            .ok_or(WorkspaceError::WeightOutOfRange(weight))?;
        let lowered = name.to_lowercase();
        if self
            .shortlist
            .parameters
            .iter()
            .any(|p| p.name.to_lowercase() == lowered)
        {
            return Err(WorkspaceError::DuplicateSkill(name.to_string()));
        }

        self.shortlist.parameters.push(SkillParameter::new(name, weight));
        Ok(&self.shortlist.parameters[self.shortlist.parameters.len() - 1])
    }

    /// Removes a staged skill by id. Unknown ids are a no-op.
    pub fn stage_remove(&mut self, id: &str) -> Option<SkillParameter> {
        let index = self.shortlist.parameters.iter().position(|p| p.id == id)?;
        Some(self.shortlist.parameters.remove(index))
    }

    pub fn update_details(&mut self, update: DetailsUpdate) {
        if let Some(title) = update.title {
            self.shortlist.title = title;
        }
        if let Some(job_title) = update.job_title {
            self.shortlist.job_title = job_title;
        }
        if let Some(job_description) = update.job_description {
            self.shortlist.job_description = job_description;
        }
    }

    /// Copies the staged list into the confirmed list and reconciles the
    /// skill filters. Fails without touching anything when the shortlist or
    /// job title is blank.
    pub fn confirm(&mut self) -> Result<&[SkillFilter], WorkspaceError> {
        if self.shortlist.title.trim().is_empty() || self.shortlist.job_title.trim().is_empty() {
            return Err(WorkspaceError::MissingTitle);
        }
        let staged = self.shortlist.parameters.clone();
        Ok(self.on_confirmed_parameters_changed(staged))
    }

    /// Installs a new confirmed parameter list and rebuilds the skill filter
    /// set from scratch: one entry per confirmed name, thresholds kept only
    /// for names that were already filtered on.
    pub fn on_confirmed_parameters_changed(&mut self, params: Vec<SkillParameter>) -> &[SkillFilter] {
        self.query.filter.skill_filters =
            reconcile_skill_filters(&self.query.filter.skill_filters, &params);
        self.confirmed = params;
        &self.query.filter.skill_filters
    }

    /// Applies a filter update. Thresholds for names that are not confirmed
    /// are rejected so the filter set keeps matching the confirmed list.
    pub fn update_filters(&mut self, update: FilterUpdate) -> Result<(), WorkspaceError> {
        if let Some(unknown) = update
            .skill_filters
            .iter()
            .find(|f| !self.confirmed.iter().any(|p| p.name == f.skill_name))
        {
            return Err(WorkspaceError::UnknownSkillFilter(unknown.skill_name.clone()));
        }

        if let Some(search) = update.search {
            self.query.filter.search = search;
        }
        if let Some(min_overall) = update.min_overall {
            self.query.filter.min_overall = min_overall;
        }
        for change in update.skill_filters {
            if let Some(filter) = self
                .query
                .filter
                .skill_filters
                .iter_mut()
                .find(|f| f.skill_name == change.skill_name)
            {
                filter.min_score = change.min_score;
            }
        }
        Ok(())
    }

    pub fn toggle_sort(&mut self, key: SortKey) -> &SortConfig {
        let next = SortConfig::toggled(self.query.sort.as_ref(), key);
        self.query.sort.insert(next)
    }

    pub fn clear_sort(&mut self) {
        self.query.sort = None;
    }

    /// Filtered and sorted candidates as currently displayed.
    pub fn view(&self) -> Vec<&Candidate> {
        self.query.view(&self.shortlist.candidates)
    }

    pub fn export(&self, filename: Option<&str>) -> Result<CsvExport, ExportError> {
        export_csv(&self.view(), &self.confirmed, filename)
    }

    /// Swaps in freshly scored candidates. Parameters and filters stay as they are.
    pub fn replace_candidates(&mut self, candidates: Vec<Candidate>) {
        self.shortlist.candidates = candidates;
    }

    /// Records a successful save to the backend.
    pub fn mark_saved(&mut self, jd_id: Option<String>) {
        if jd_id.is_some() {
            self.shortlist.id = jd_id;
        }
        self.shortlist.is_draft = false;
        self.shortlist.last_modified = Utc::now();
    }

    pub fn touch(&mut self) {
        self.shortlist.last_modified = Utc::now();
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner == user_id
    }

    pub fn summary(&self) -> WorkspaceSummary {
        WorkspaceSummary {
            workspace_id: self.id,
            jd_id: self.shortlist.id.clone(),
            title: self.shortlist.title.clone(),
            job_title: self.shortlist.job_title.clone(),
            candidate_count: self.shortlist.candidate_count(),
            last_modified: self.shortlist.last_modified,
            is_draft: self.shortlist.is_draft,
        }
    }
}
