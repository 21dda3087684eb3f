//! Roadmap generation. Always produces a usable roadmap: the LLM's when its
//! answer parses, a four-phase template built from the request otherwise.

use serde_json::{json, Map, Value};

use crate::learning::prompts::{build_roadmap_prompt, roadmap_system};
use crate::llm_client::extract::{extract_document, generate_or_fallback, ExtractError};
use crate::llm_client::LlmGateway;

#[derive(Debug, Clone)]
pub struct RoadmapParams {
    pub subject: String,
    pub skill_level: String,
    pub final_goal: String,
    pub daily_time: String,
    pub timeline: String,
    /// `roadmap_type == "advanced"`
    pub advanced: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Roadmap {
    pub lessons: Vec<Value>,
    pub overview: Map<String, Value>,
    pub final_checklist: Vec<Value>,
    pub next_steps: Vec<Value>,
}

pub async fn generate_roadmap(llm: &dyn LlmGateway, params: &RoadmapParams) -> Roadmap {
    generate_or_fallback(
        llm,
        &build_roadmap_prompt(params),
        &roadmap_system(),
        "roadmap",
        parse_roadmap,
        || fallback_roadmap(&params.subject, &params.skill_level, &params.timeline),
    )
    .await
}

/// Accepts any object with a non-empty `lessons` array; the sibling fields are
/// optional and default to empty when missing or of the wrong type.
pub fn parse_roadmap(raw: &str) -> Result<Roadmap, ExtractError> {
    let mut doc = extract_document(raw, "lessons")?;
    let lessons = match doc.remove("lessons") {
        Some(Value::Array(lessons)) => lessons,
        _ => return Err(ExtractError::NotAnArray("lessons")),
    };
    Ok(Roadmap {
        lessons,
        overview: take_object(&mut doc, "overview"),
        final_checklist: take_array(&mut doc, "final_checklist"),
        next_steps: take_array(&mut doc, "next_steps"),
    })
}

fn take_object(doc: &mut Map<String, Value>, key: &str) -> Map<String, Value> {
    match doc.remove(key) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn take_array(doc: &mut Map<String, Value>, key: &str) -> Vec<Value> {
    match doc.remove(key) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// The deterministic four-phase template used whenever the LLM output is unusable.
pub fn fallback_roadmap(subject: &str, skill_level: &str, timeline: &str) -> Roadmap {
    let overview = json!({
        "total_duration": timeline,
        "total_phases": 4,
        "estimated_hours": 60,
        "difficulty": skill_level,
    });

    let lessons = vec![
        json!({
            "phase": 1,
            "title": format!("Foundation & Fundamentals of {subject}"),
            "duration": "Week 1",
            "objectives": [
                format!("Understand core {subject} concepts"),
                "Set up learning environment",
                "Complete first exercises"
            ],
            "topics": ["Basic terminology", "Core principles", "Getting started", "First hands-on practice"],
            "description": format!(
                "Build a rock-solid foundation in {subject}. Learn the essential concepts, \
                 why they matter, and practice with beginner-friendly exercises."
            ),
            "practice": format!(
                "Complete 5 beginner exercises in {subject}. Build a first mini-project to apply what you've learned."
            ),
            "resources": ["Official documentation", "Video tutorial series", "Interactive practice platform"],
            "tools": ["A code editor or notebook", "Online playground", "Community forum"],
            "common_mistakes": ["Rushing through basics", "Not practicing enough", "Skipping documentation"],
            "success_metrics": ["Can explain core concepts", "Completed all basic exercises", "Built first project"],
            "duration_minutes": 420
        }),
        json!({
            "phase": 2,
            "title": format!("Intermediate {subject} Skills"),
            "duration": "Week 2",
            "objectives": [
                format!("Master intermediate {subject} concepts"),
                "Build practical projects",
                "Understand best practices"
            ],
            "topics": ["Advanced concepts", "Design patterns", "Problem-solving techniques", "Real-world applications"],
            "description": format!(
                "Level up your {subject} skills with intermediate concepts. Learn industry best \
                 practices and build projects that showcase your growing expertise."
            ),
            "practice": "Build 2-3 intermediate projects. Solve 15 challenges. Refactor your previous work.",
            "resources": ["Advanced course", "Project-based tutorials", "Reference repositories"],
            "tools": ["Testing frameworks", "Debugging tools", "Version control (Git)"],
            "common_mistakes": ["Not following best practices", "Ignoring quality", "Working in isolation"],
            "success_metrics": ["Can solve intermediate problems", "Portfolio has 3 solid projects", "Understand design patterns"],
            "duration_minutes": 540
        }),
        json!({
            "phase": 3,
            "title": format!("Advanced {subject} & Specialization"),
            "duration": "Week 3",
            "objectives": [
                format!("Master advanced {subject} topics"),
                "Choose a specialization area",
                "Build complex projects"
            ],
            "topics": ["Performance optimization", "Advanced patterns", "System design", "Specialized topics"],
            "description": format!(
                "Dive deep into advanced {subject} topics. Choose a specialization and build expertise in it."
            ),
            "practice": "Build 1 complex, production-ready project. Contribute to open source. Optimize existing work.",
            "resources": ["Advanced books", "Research papers", "Expert blogs and talks"],
            "tools": ["Profiling tools", "Advanced frameworks", "Cloud platforms"],
            "common_mistakes": ["Trying to learn everything", "Not specializing", "Avoiding complex problems"],
            "success_metrics": ["Can architect complex systems", "Expert in chosen specialization", "Production-ready project"],
            "duration_minutes": 600
        }),
        json!({
            "phase": 4,
            "title": "Mastery & Real-World Application",
            "duration": "Week 4",
            "objectives": ["Apply skills in real-world scenarios", "Build capstone project", "Prepare for opportunities"],
            "topics": ["Industry practices", "Interview preparation", "Portfolio building", "Continuous learning"],
            "description": format!(
                "Turn your {subject} knowledge into marketable skills. Build a capstone project and prepare for real opportunities."
            ),
            "practice": "Build a capstone project. Prepare resume and portfolio. Practice interviews. Network with professionals.",
            "resources": ["Interview prep platforms", "Portfolio examples", "Networking communities"],
            "tools": ["Portfolio website builder", "Interview prep tools", "LinkedIn"],
            "common_mistakes": ["Poor portfolio presentation", "Not networking", "Stopping learning"],
            "success_metrics": [format!("Expert-level {subject} skills"), "Impressive portfolio", "Ready for opportunities"],
            "duration_minutes": 480
        }),
    ];

    let final_checklist = vec![
        json!(format!("✅ Deep understanding of {subject} fundamentals")),
        json!("✅ Built 5+ projects showcasing various skills"),
        json!("✅ Can solve complex problems independently"),
        json!("✅ Portfolio ready to showcase to employers"),
        json!(format!("✅ Active in {subject} community")),
        json!("✅ Ready for technical interviews"),
        json!("✅ Continuous learning habit established"),
    ];

    let next_steps = vec![
        json!(format!("Explore advanced {subject} specializations")),
        json!("Contribute to major open-source projects"),
        json!("Start freelancing or apply for jobs"),
        json!(format!("Mentor others learning {subject}")),
        json!("Stay updated with latest trends"),
    ];

    Roadmap {
        lessons,
        overview: match overview {
            Value::Object(map) => map,
            _ => Map::new(),
        },
        final_checklist,
        next_steps,
    }
}
