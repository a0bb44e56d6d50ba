use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Highest score the backend assigns to a single skill.
pub const MAX_SKILL_SCORE: u8 = 10;
/// Upper bound of the overall ranking percentage.
pub const MAX_OVERALL_SCORE: f64 = 100.0;
/// Upper bounds of the breakdown components (they sum to `MAX_OVERALL_SCORE`).
pub const MAX_JD_SCORE: f64 = 30.0;
pub const MAX_SKILLS_SCORE: f64 = 70.0;

/// A scored candidate as returned by the scoring backend.
///
/// Candidates are never mutated after decoding; the table engine only builds
/// filtered and ordered views over them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub resume_url: String,
    /// Skill name → score 0..=10. Skills the backend did not score are absent.
    pub skills: BTreeMap<String, u8>,
    /// Percentage 0..=100.
    pub overall_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

/// Component scores sent by backends that split the overall score into a
/// job-description match (out of 30) and a weighted skills match (out of 70).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub jd_score: f64,
    pub skills_score: f64,
}

impl Candidate {
    /// Score for `skill`, treating a missing entry as 0.
    pub fn skill_score(&self, skill: &str) -> u8 {
        self.skills.get(skill).copied().unwrap_or(0)
    }
}
