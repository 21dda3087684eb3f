use crate::llm_client::prompts::json_only;

pub const COUNSELOR_PERSONA: &str = "You are a professional career counselor. \
Provide detailed, realistic career recommendations.";

/// Number of careers the model is asked for.
pub const CAREER_COUNT: usize = 5;

pub fn counselor_system() -> String {
    json_only(COUNSELOR_PERSONA)
}

pub fn build_career_prompt(interests: &[String], skills: &[String]) -> String {
    format!(
        r#"Based on these interests: {interests} and skills: {skills}, recommend {CAREER_COUNT} suitable career paths.

For each career, provide:
- title: Career title
- description: Brief description (2-3 sentences)
- salary_range: Expected salary (e.g., "$50k-$80k per year" or "₹6-12 LPA")
- required_skills: List of 4-6 key skills needed
- roadmap: List of 5-7 specific steps to reach this career

Return JSON in this exact format:
{{"careers": [{{"title": "Software Developer", "description": "Build applications and software", "salary_range": "$60k-$100k", "required_skills": ["Python", "JavaScript", "Problem Solving"], "roadmap": ["Learn programming basics", "Build portfolio projects", "Get internship"]}}]}}"#,
        interests = interests.join(", "),
        skills = skills.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_interests_and_skills() {
        let prompt = build_career_prompt(
            &["design".into(), "art".into()],
            &["Figma".into()],
        );
        assert!(prompt.contains("interests: design, art and skills: Figma"));
        assert!(prompt.contains("recommend 5 suitable career paths"));
        assert!(prompt.contains(r#"{"careers": [{"title""#));
    }
}
