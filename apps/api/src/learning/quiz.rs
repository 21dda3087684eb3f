//! Per-phase quizzes: generation through the same parse-or-fallback contract
//! as roadmaps, and grading of submitted answers.

use serde::Serialize;
use serde_json::Value;

use crate::learning::prompts::{build_quiz_prompt, quiz_system};
use crate::llm_client::extract::{extract_array, generate_or_fallback, ExtractError};
use crate::llm_client::LlmGateway;
use crate::models::quiz::{Quiz, QuizQuestion};

pub const QUESTIONS_PER_QUIZ: usize = 5;
pub const PASS_PERCENTAGE: i64 = 70;
const ANSWER_LETTERS: [&str; 4] = ["A", "B", "C", "D"];

#[derive(Debug, Clone, Serialize)]
pub struct QuestionResult {
    pub question: String,
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizResult {
    pub score: usize,
    pub total_questions: usize,
    pub percentage: i64,
    pub passed: bool,
    pub results: Vec<QuestionResult>,
}

pub async fn generate_questions(
    llm: &dyn LlmGateway,
    subject: &str,
    phase_title: &str,
    topics: &[String],
) -> Vec<QuizQuestion> {
    generate_or_fallback(
        llm,
        &build_quiz_prompt(subject, phase_title, topics, QUESTIONS_PER_QUIZ),
        &quiz_system(),
        "quiz",
        parse_questions,
        || fallback_questions(subject, phase_title),
    )
    .await
}

/// Unlike roadmaps, each question must be well-formed: grading depends on it.
pub fn parse_questions(raw: &str) -> Result<Vec<QuizQuestion>, ExtractError> {
    extract_array(raw, "questions")?
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let bad = |reason: String| ExtractError::BadElement {
                field: "questions",
                index,
                reason,
            };
            let mut question: QuizQuestion =
                serde_json::from_value(item).map_err(|e| bad(e.to_string()))?;
            question.correct_answer = normalize_answer(&question.correct_answer);
            let valid_letters = &ANSWER_LETTERS[..question.options.len().min(ANSWER_LETTERS.len())];
            if !valid_letters.contains(&question.correct_answer.as_str()) {
                return Err(bad(format!(
                    "correct_answer '{}' does not name one of {} options",
                    question.correct_answer,
                    question.options.len()
                )));
            }
            Ok(question)
        })
        .collect()
}

fn normalize_answer(answer: &str) -> String {
    answer.trim().to_uppercase()
}

/// Generic comprehension questions about the phase; the correct option is
/// always the one describing deliberate practice and understanding.
pub fn fallback_questions(subject: &str, phase_title: &str) -> Vec<QuizQuestion> {
    let q = |question: String, options: [&str; 4], correct: &str, explanation: &str| QuizQuestion {
        question,
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer: correct.to_string(),
        explanation: explanation.to_string(),
    };

    vec![
        q(
            format!("What is the main goal of the phase \"{phase_title}\"?"),
            [
                "Memorizing definitions without practice",
                &format!("Building working understanding of {subject} through practice"),
                "Skipping ahead to the final project",
                "Reading about the topic without exercises",
            ],
            "B",
            "Every phase pairs concepts with hands-on practice.",
        ),
        q(
            format!("Which habit helps most when learning {subject}?"),
            [
                "Practicing a little every day",
                "Studying only the night before a deadline",
                "Avoiding documentation",
                "Working only on problems you already know",
            ],
            "A",
            "Regular, spaced practice builds lasting skill.",
        ),
        q(
            "You are stuck on an exercise. What is the best next step?".to_string(),
            [
                "Give up on the phase",
                "Copy a solution without reading it",
                "Break the problem into smaller parts and test each one",
                "Move on and never return to it",
            ],
            "C",
            "Decomposing a problem is the core problem-solving skill.",
        ),
        q(
            format!("How can you tell you have mastered \"{phase_title}\"?"),
            [
                "You watched every video",
                "You finished reading the notes",
                "Someone told you it was easy",
                "You can explain the concepts and solve new exercises on your own",
            ],
            "D",
            "Mastery shows up as independent application, not exposure.",
        ),
        q(
            format!("Why build small projects while learning {subject}?"),
            [
                "They apply concepts in realistic situations",
                "They replace the need to learn fundamentals",
                "They are only useful for a portfolio",
                "They are faster than reading",
            ],
            "A",
            "Projects expose gaps that isolated exercises hide.",
        ),
    ]
}

/// Grades answers positionally; a missing or extra answer counts as wrong.
pub fn grade(quiz: &Quiz, answers: &[Option<String>]) -> QuizResult {
    let results: Vec<QuestionResult> = quiz
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let user_answer = answers.get(i).cloned().flatten();
            let is_correct = user_answer
                .as_deref()
                .map(normalize_answer)
                .is_some_and(|a| a == q.correct_answer);
            QuestionResult {
                question: q.question.clone(),
                user_answer,
                correct_answer: q.correct_answer.clone(),
                is_correct,
                explanation: q.explanation.clone(),
            }
        })
        .collect();

    let total_questions = results.len();
    let score = results.iter().filter(|r| r.is_correct).count();
    let percentage = if total_questions == 0 {
        0
    } else {
        (score as f64 * 100.0 / total_questions as f64).round() as i64
    };

    QuizResult {
        score,
        total_questions,
        percentage,
        passed: total_questions > 0 && percentage >= PASS_PERCENTAGE,
        results,
    }
}

/// Topics listed on a roadmap phase, used to steer question generation.
pub fn phase_topics(lesson: Option<&Value>) -> Vec<String> {
    lesson
        .and_then(|l| l.get("topics"))
        .and_then(Value::as_array)
        .map(|topics| {
            topics
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
