use crate::learning::roadmap::RoadmapParams;
use crate::llm_client::prompts::json_only;

pub const ROADMAP_PERSONA: &str = "You are RoadmapGPT, an elite expert in designing \
structured, professional, customized roadmaps for ANY topic. You think clearly, organize \
information perfectly, and produce actionable, step-by-step learning paths.

Your outputs must be clear and structured, beginner-friendly yet comprehensive, detailed \
with time estimates, highly practical with real projects, and motivating.";

pub const QUIZ_PERSONA: &str = "You are an experienced teacher who writes fair, \
unambiguous multiple-choice questions that check real understanding rather than recall \
of trivia.";

pub fn roadmap_system() -> String {
    json_only(ROADMAP_PERSONA)
}

pub fn quiz_system() -> String {
    json_only(QUIZ_PERSONA)
}

pub fn build_roadmap_prompt(params: &RoadmapParams) -> String {
    let detail_level = if params.advanced {
        "deeply detailed with advanced concepts, multiple projects, and expert-level resources"
    } else {
        "well-structured with essential concepts and practical projects"
    };
    let RoadmapParams {
        subject,
        skill_level,
        final_goal,
        daily_time,
        timeline,
        ..
    } = params;

    format!(
        r#"Create a COMPREHENSIVE {detail_level} roadmap for: {subject}

USER PROFILE:
- Current Level: {skill_level}
- Final Goal: {final_goal}
- Daily Study Time: {daily_time}
- Timeline: {timeline}

Create a professional roadmap with phases. For EACH phase include the phase name and
duration, learning objectives, 3-5 topics, a description, practical exercises, recommended
resources and tools, common mistakes to avoid, and success metrics.

Return ONLY valid JSON (no markdown):
{{
  "overview": {{
    "total_duration": "{timeline}",
    "total_phases": 4,
    "estimated_hours": 60,
    "difficulty": "{skill_level}"
  }},
  "lessons": [
    {{
      "phase": 1,
      "title": "Foundation & Basics",
      "duration": "Week 1",
      "objectives": ["Master fundamental concepts", "Build first project"],
      "topics": ["Core concept 1", "Core concept 2", "Core concept 3"],
      "description": "Detailed description of what you'll learn",
      "practice": "Build a beginner project",
      "resources": ["Resource 1", "Resource 2"],
      "tools": ["Tool 1", "Tool 2"],
      "common_mistakes": ["Mistake 1", "Mistake 2"],
      "success_metrics": ["Can do X", "Understand Y"],
      "duration_minutes": 300
    }}
  ],
  "final_checklist": ["Skill checkpoint 1", "Can build X from scratch"],
  "next_steps": ["Advanced topic 1", "Advanced topic 2"]
}}

Make it {detail_level} and perfectly suited for {skill_level} level."#
    )
}

pub fn build_quiz_prompt(subject: &str, phase_title: &str, topics: &[String], count: usize) -> String {
    let topics = if topics.is_empty() {
        "the phase as a whole".to_string()
    } else {
        topics.join(", ")
    };
    format!(
        r#"Write {count} multiple-choice questions for a learner who just finished the phase
"{phase_title}" of a {subject} roadmap. Cover: {topics}.

Each question has exactly four options; correct_answer is the letter of the right option.

Return ONLY valid JSON (no markdown):
{{"questions": [{{"question": "...", "options": ["...", "...", "...", "..."], "correct_answer": "A", "explanation": "..."}}]}}"#
    )
}
