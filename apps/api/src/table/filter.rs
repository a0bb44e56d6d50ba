use serde::{Deserialize, Serialize};

use crate::models::{Candidate, SkillParameter};

/// Minimum score required for one confirmed skill. `min_score: None` means
/// the skill column is shown but not filtered on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillFilter {
    pub skill_name: String,
    #[serde(default)]
    pub min_score: Option<f64>,
}

impl SkillFilter {
    pub fn unset(skill_name: impl Into<String>) -> Self {
        Self {
            skill_name: skill_name.into(),
            min_score: None,
        }
    }
}

/// Everything the filter stage needs besides the candidates themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub min_overall: Option<f64>,
    #[serde(default)]
    pub skill_filters: Vec<SkillFilter>,
}

impl CandidateFilter {
    /// True when the candidate passes every active predicate.
    pub fn matches(&self, candidate: &Candidate) -> bool {
        self.matches_search(candidate)
            && self
                .min_overall
                .map_or(true, |min| candidate.overall_score >= min)
            && self.skill_filters.iter().all(|filter| {
                filter
                    .min_score
                    .map_or(true, |min| f64::from(candidate.skill_score(&filter.skill_name)) >= min)
            })
    }

    fn matches_search(&self, candidate: &Candidate) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&candidate.name, &candidate.email, &candidate.phone]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Returns the candidates that pass, in their original relative order.
    pub fn apply<'a>(&self, candidates: &'a [Candidate]) -> Vec<&'a Candidate> {
        candidates.iter().filter(|c| self.matches(c)).collect()
    }
}

/// Rebuilds the skill filters for a new confirmed parameter list.
///
/// One filter per confirmed parameter, in parameter order. A threshold
/// survives only when a filter for that exact name already existed.
pub fn reconcile_skill_filters(
    existing: &[SkillFilter],
    confirmed: &[SkillParameter],
) -> Vec<SkillFilter> {
    confirmed
        .iter()
        .map(|param| SkillFilter {
            skill_name: param.name.clone(),
            min_score: existing
                .iter()
                .find(|f| f.skill_name == param.name)
                .and_then(|f| f.min_score),
        })
        .collect()
}
