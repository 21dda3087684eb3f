use crate::models::chat::{ChatMessage, ChatRole};

pub const TUTOR_SYSTEM: &str = "You are an expert AI tutor at Eduntra AI platform. \
Your role is to help students learn effectively and master concepts.

CORE PRINCIPLES:
1. Language Matching: ALWAYS respond in the EXACT SAME LANGUAGE the student uses. \
If they write in Hindi, respond in Hindi. If in Spanish, respond in Spanish.
2. Accuracy: Provide factually correct, up-to-date information. If unsure, \
acknowledge it and guide students to verified resources.
3. Clear Explanations: break complex topics into simple parts, use analogies and \
real-world examples, and give step-by-step explanations for problems.
4. Educational Approach: ask guiding questions, explain WHY and not just what, \
adapt difficulty to the student's level, and celebrate progress.
5. Engagement: be friendly, patient and encouraging.
6. Subject Expertise: mathematics, sciences, programming and computer science, \
languages and literature, history and social studies, business and economics, \
and all other academic subjects.

Remember: match the student's language, be accurate, and make learning enjoyable!";

/// Sent to the student when the LLM cannot be reached.
pub const TUTOR_UNAVAILABLE_REPLY: &str = "I'm having trouble reaching my knowledge \
service right now. Please try asking again in a moment.";

/// Number of earlier turns quoted back to the model.
pub const CONTEXT_TURNS: usize = 5;

/// Renders the tail of a session as `Student:` / `Tutor:` lines.
pub fn conversation_context(history: &[ChatMessage]) -> String {
    let start = history.len().saturating_sub(CONTEXT_TURNS);
    history[start..]
        .iter()
        .map(|m| {
            let speaker = match m.role {
                ChatRole::User => "Student",
                ChatRole::Assistant => "Tutor",
            };
            format!("{speaker}: {}\n", m.content)
        })
        .collect()
}

pub fn build_tutor_prompt(context: &str, message: &str, language: Option<&str>) -> String {
    let language_hint = match language {
        Some(lang) if !lang.is_empty() && lang != "auto" => {
            format!(" The student's language appears to be '{lang}'.")
        }
        _ => String::new(),
    };

    if context.is_empty() {
        format!(
            "Student's question: {message}\n\n\
             Important: Respond in the SAME LANGUAGE as this question.{language_hint} \
             Provide accurate, clear educational explanations."
        )
    } else {
        format!(
            "Previous conversation context:\n{context}\n\
             Current question: {message}\n\n\
             Important: Respond in the SAME LANGUAGE as the current question.{language_hint} \
             Provide accurate, educational responses that build on our conversation."
        )
    }
}
