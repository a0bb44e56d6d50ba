pub mod candidate;
pub mod parameter;
pub mod shortlist;

pub use candidate::{Candidate, ScoreBreakdown};
pub use parameter::SkillParameter;
pub use shortlist::{Shortlist, ShortlistSummary};
