//! Candidate table engine: filter, then sort, then (optionally) export.
//!
//! Every stage is a pure function over borrowed candidates. Nothing here
//! mutates a `Candidate`.

pub mod csv;
pub mod filter;
pub mod sort;

use serde::{Deserialize, Serialize};

use crate::models::Candidate;

pub use self::csv::{export_csv, CsvExport, ExportError};
pub use filter::{reconcile_skill_filters, CandidateFilter, SkillFilter};
pub use sort::{sort_candidates, SortConfig, SortDirection, SortKey};

/// The full table state a user has dialled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableQuery {
    #[serde(flatten)]
    pub filter: CandidateFilter,
    #[serde(default)]
    pub sort: Option<SortConfig>,
}

impl TableQuery {
    /// Filtered and ordered view over `candidates`.
    pub fn view<'a>(&self, candidates: &'a [Candidate]) -> Vec<&'a Candidate> {
        sort_candidates(self.filter.apply(candidates), self.sort.as_ref())
    }
}
