pub const SUGGEST_SKILLS_SYSTEM: &str = "You are an expert recruitment analyst. \
    You MUST respond with a JSON array of strings only. \
    Do NOT include any text outside the array. \
    Do NOT use markdown code fences.";

/// Builds the user prompt for skill extraction from a job description.
pub fn suggest_skills_prompt(job_description: &str) -> String {
    format!(
        r#"Analyze the job description below and extract the most relevant, concrete, technical skills the role requires.
Focus on hard skills only: tools, technologies, languages and domain expertise. Leave out generic traits such as "communication" or "leadership".

Return 5 to 10 unique skills using short standard names (e.g. "Python", "SQL", "React", "AWS", "Data Analysis").

Job Description:
---
{job_description}
---

Respond with a JSON array of strings, for example ["Python", "SQL"]."#
    )
}
