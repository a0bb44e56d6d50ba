use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Candidate;

/// Column a table can be sorted by. Anything that is not a fixed column is a
/// skill name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    Name,
    Email,
    OverallScore,
    Skill(String),
}

impl From<String> for SortKey {
    fn from(key: String) -> Self {
        match key.as_str() {
            "name" => SortKey::Name,
            "email" => SortKey::Email,
            "overallScore" | "overall_score" => SortKey::OverallScore,
            _ => SortKey::Skill(key),
        }
    }
}

impl From<&str> for SortKey {
    fn from(key: &str) -> Self {
        SortKey::from(key.to_string())
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.to_string()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Name => f.write_str("name"),
            SortKey::Email => f.write_str("email"),
            SortKey::OverallScore => f.write_str("overallScore"),
            SortKey::Skill(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn ascending(key: impl Into<SortKey>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: impl Into<SortKey>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Header-click behaviour: clicking the column currently sorted ascending
    /// flips it to descending, any other click sorts ascending.
    pub fn toggled(current: Option<&SortConfig>, key: SortKey) -> SortConfig {
        match current {
            Some(cfg) if cfg.key == key && cfg.direction == SortDirection::Ascending => {
                SortConfig::descending(key)
            }
            _ => SortConfig::ascending(key),
        }
    }

    fn compare(&self, a: &Candidate, b: &Candidate) -> Ordering {
        let natural = match &self.key {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Email => a.email.to_lowercase().cmp(&b.email.to_lowercase()),
            SortKey::OverallScore => a.overall_score.total_cmp(&b.overall_score),
            SortKey::Skill(skill) => a.skill_score(skill).cmp(&b.skill_score(skill)),
        };
        match self.direction {
            SortDirection::Ascending => natural,
            SortDirection::Descending => natural.reverse(),
        }
    }
}

/// Orders a view. `None` keeps the received order.
///
/// `slice::sort_by` is a stable merge sort, so equal keys stay in the order
/// they were encountered in either direction.
pub fn sort_candidates<'a>(
    mut view: Vec<&'a Candidate>,
    config: Option<&SortConfig>,
) -> Vec<&'a Candidate> {
    if let Some(config) = config {
        view.sort_by(|a, b| config.compare(a, b));
    }
    view
}
