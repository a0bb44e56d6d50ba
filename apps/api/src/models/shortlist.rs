use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Candidate, SkillParameter};

/// A job posting with its skill weights and the candidates ranked against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortlist {
    /// Backend record id. `None` until the shortlist is saved for the first time.
    pub id: Option<String>,
    pub title: String,
    pub job_title: String,
    pub job_description: String,
    pub parameters: Vec<SkillParameter>,
    pub candidates: Vec<Candidate>,
    pub last_modified: DateTime<Utc>,
    pub is_draft: bool,
}

impl Shortlist {
    /// An unsaved, empty draft.
    pub fn draft() -> Self {
        Self {
            id: None,
            title: String::new(),
            job_title: String::new(),
            job_description: String::new(),
            parameters: Vec::new(),
            candidates: Vec::new(),
            last_modified: Utc::now(),
            is_draft: true,
        }
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn summary(&self) -> ShortlistSummary {
        ShortlistSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            job_title: self.job_title.clone(),
            candidate_count: self.candidate_count(),
            last_modified: self.last_modified,
            is_draft: self.is_draft,
        }
    }
}

/// Dashboard card for a shortlist or draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistSummary {
    pub id: Option<String>,
    pub title: String,
    pub job_title: String,
    pub candidate_count: usize,
    pub last_modified: DateTime<Utc>,
    pub is_draft: bool,
}
