//! AI skill suggestions for a job description.
//!
//! Model output is advisory free text. It is unwrapped defensively, parsed
//! into a list of names, then cleaned up before reaching the caller.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

pub mod handlers;
pub mod prompts;

use crate::llm_client::{LlmClient, LlmError};
use prompts::{suggest_skills_prompt, SUGGEST_SKILLS_SYSTEM};

pub const MAX_SUGGESTIONS: usize = 10;

#[async_trait]
pub trait SkillSuggester: Send + Sync {
    async fn suggest(&self, job_description: &str) -> Result<Vec<String>, LlmError>;
}

/// Default suggester backed by the LLM client.
pub struct LlmSkillSuggester {
    llm: LlmClient,
}

impl LlmSkillSuggester {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SkillSuggester for LlmSkillSuggester {
    async fn suggest(&self, job_description: &str) -> Result<Vec<String>, LlmError> {
        let text = self
            .llm
            .complete(&suggest_skills_prompt(job_description), SUGGEST_SKILLS_SYSTEM)
            .await?;
        let skills = normalize_skills(parse_skill_list(&text)?);
        info!("Suggested {} skills via {}", skills.len(), self.llm.model());
        Ok(skills)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SkillList {
    Bare(Vec<String>),
    Wrapped { skills: Vec<String> },
}

impl From<SkillList> for Vec<String> {
    fn from(list: SkillList) -> Self {
        match list {
            SkillList::Bare(skills) | SkillList::Wrapped { skills } => skills,
        }
    }
}

/// Parses a skill list out of model text.
///
/// Accepts a bare array or `{"skills": [...]}`, with or without code fences.
/// Falls back to the outermost `[...]` span when the model adds prose.
pub fn parse_skill_list(text: &str) -> Result<Vec<String>, LlmError> {
    let text = strip_json_fences(text);
    let first_error = match serde_json::from_str::<SkillList>(text) {
        Ok(list) => return Ok(list.into()),
        Err(e) => e,
    };

    match (text.find('['), text.rfind(']')) {
        (Some(start), Some(end)) if start < end => {
            serde_json::from_str::<Vec<String>>(&text[start..=end]).map_err(LlmError::Parse)
        }
        _ => Err(LlmError::Parse(first_error)),
    }
}

/// Trims names, drops blanks, removes case-insensitive duplicates (first
/// spelling wins) and caps the list at `MAX_SUGGESTIONS`.
pub fn normalize_skills(raw: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    raw.into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match inner {
        Some(stripped) => {
            let stripped = stripped.trim_start();
            stripped
                .strip_suffix("```")
                .map(str::trim)
                .unwrap_or(stripped)
        }
        None => text,
    }
}
