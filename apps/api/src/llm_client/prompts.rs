// Shared prompt fragments.
// Each feature that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt suffix that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appends the JSON-only rule to a persona system prompt.
pub fn json_only(persona: &str) -> String {
    format!("{persona}\n\n{JSON_ONLY_SYSTEM}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_only_keeps_persona_first() {
        let system = json_only("You are a career counselor.");
        assert!(system.starts_with("You are a career counselor."));
        assert!(system.ends_with(JSON_ONLY_SYSTEM));
    }
}
