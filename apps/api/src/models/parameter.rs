use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_WEIGHT: u8 = 1;
pub const MAX_WEIGHT: u8 = 10;
pub const DEFAULT_WEIGHT: u8 = 5;

/// A recruiter-defined skill and how much it matters for the role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillParameter {
    pub id: String,
    pub name: String,
    pub weight: u8,
}

impl SkillParameter {
    /// Builds a parameter with a freshly generated id.
    pub fn new(name: impl Into<String>, weight: u8) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            weight,
        }
    }

    pub fn weight_in_range(weight: u8) -> bool {
        (MIN_WEIGHT..=MAX_WEIGHT).contains(&weight)
    }
}
