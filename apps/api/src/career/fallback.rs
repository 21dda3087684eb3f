//! Template careers used when the LLM answer is unusable.
//!
//! Each bucket contributes its career when any of the caller's skills or
//! interests equals one of its keywords, ignoring case. Buckets are checked in
//! table order, so the result is deterministic for a given input.

use serde_json::{json, Value};

pub const MIN_CAREERS: usize = 3;
pub const MAX_CAREERS: usize = 5;

struct CareerTemplate {
    title: &'static str,
    description: &'static str,
    salary_range: &'static str,
    required_skills: [&'static str; 5],
    roadmap: [&'static str; 7],
}

impl CareerTemplate {
    fn to_value(&self) -> Value {
        json!({
            "title": self.title,
            "description": self.description,
            "salary_range": self.salary_range,
            "required_skills": self.required_skills,
            "roadmap": self.roadmap,
        })
    }
}

const BUCKETS: [(&[&str], CareerTemplate); 5] = [
    (
        &["programming", "coding", "python", "javascript", "tech", "computer"],
        CareerTemplate {
            title: "Software Developer",
            description: "Design, develop, and maintain software applications. Work with various \
                programming languages and frameworks to create solutions.",
            salary_range: "₹6-15 LPA",
            required_skills: ["Programming", "Problem Solving", "Algorithms", "Data Structures", "Git"],
            roadmap: [
                "Master a programming language (Python/JavaScript)",
                "Learn data structures and algorithms",
                "Build 5-10 portfolio projects",
                "Contribute to open source",
                "Apply for internships",
                "Prepare for technical interviews",
                "Land first developer role",
            ],
        },
    ),
    (
        &["design", "creative", "art", "ui", "ux"],
        CareerTemplate {
            title: "UI/UX Designer",
            description: "Create user-friendly interfaces and experiences for digital products. \
                Focus on user research, wireframing, and visual design.",
            salary_range: "₹4-10 LPA",
            required_skills: ["Figma", "Adobe XD", "User Research", "Wireframing", "Prototyping"],
            roadmap: [
                "Learn design fundamentals",
                "Master Figma/Adobe XD",
                "Study UX principles",
                "Build design portfolio",
                "Complete design challenges",
                "Network with designers",
                "Apply for design roles",
            ],
        },
    ),
    (
        &["business", "marketing", "management", "strategy"],
        CareerTemplate {
            title: "Business Analyst",
            description: "Analyze business processes and recommend improvements. Work with data \
                to drive business decisions and strategy.",
            salary_range: "₹5-12 LPA",
            required_skills: ["Excel", "Data Analysis", "SQL", "Communication", "Problem Solving"],
            roadmap: [
                "Learn Excel and SQL",
                "Understand business fundamentals",
                "Study data analysis",
                "Work on case studies",
                "Get business certifications",
                "Build analysis portfolio",
                "Apply for analyst positions",
            ],
        },
    ),
    (
        &["data", "analytics", "statistics", "math", "science"],
        CareerTemplate {
            title: "Data Analyst",
            description: "Collect, process, and analyze data to help organizations make informed \
                decisions. Create visualizations and reports.",
            salary_range: "₹5-10 LPA",
            required_skills: ["Python", "SQL", "Excel", "Statistics", "Data Visualization"],
            roadmap: [
                "Learn Python and SQL",
                "Study statistics",
                "Master Excel",
                "Learn Tableau/Power BI",
                "Work on data projects",
                "Build analysis portfolio",
                "Apply for data roles",
            ],
        },
    ),
    (
        &["writing", "content", "communication", "english"],
        CareerTemplate {
            title: "Content Writer",
            description: "Create engaging written content for websites, blogs, social media, and \
                marketing materials. Research topics and write clear, compelling copy.",
            salary_range: "₹3-7 LPA",
            required_skills: ["Writing", "SEO", "Research", "Editing", "Creativity"],
            roadmap: [
                "Improve writing skills",
                "Learn SEO basics",
                "Start a blog",
                "Build writing portfolio",
                "Join content platforms",
                "Network with writers",
                "Apply for writing positions",
            ],
        },
    ),
];

/// Appended together whenever the buckets produced fewer than `MIN_CAREERS`.
const GENERIC: [CareerTemplate; 2] = [
    CareerTemplate {
        title: "Digital Marketing Specialist",
        description: "Plan and execute digital marketing campaigns across various channels. \
            Analyze metrics and optimize for better results.",
        salary_range: "₹4-9 LPA",
        required_skills: ["Social Media", "SEO", "Google Ads", "Analytics", "Content Marketing"],
        roadmap: [
            "Learn digital marketing basics",
            "Get Google certifications",
            "Practice with real campaigns",
            "Build case studies",
            "Master social media",
            "Network in marketing",
            "Apply for marketing roles",
        ],
    },
    CareerTemplate {
        title: "Project Coordinator",
        description: "Support project managers in planning, executing, and closing projects. \
            Coordinate team activities and track project progress.",
        salary_range: "₹4-8 LPA",
        required_skills: ["Organization", "Communication", "MS Office", "Time Management", "Teamwork"],
        roadmap: [
            "Learn project management basics",
            "Get PMP/Agile certification",
            "Develop organizational skills",
            "Volunteer for projects",
            "Build coordination experience",
            "Network with PMs",
            "Apply for coordinator roles",
        ],
    },
];

pub fn fallback_careers(interests: &[String], skills: &[String]) -> Vec<Value> {
    let terms: Vec<String> = skills
        .iter()
        .chain(interests)
        .map(|t| t.to_lowercase())
        .collect();

    let mut careers: Vec<Value> = BUCKETS
        .iter()
        .filter(|(keywords, _)| terms.iter().any(|t| keywords.contains(&t.as_str())))
        .map(|(_, template)| template.to_value())
        .collect();

    if careers.len() < MIN_CAREERS {
        careers.extend(GENERIC.iter().map(CareerTemplate::to_value));
    }
    careers.truncate(MAX_CAREERS);
    careers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn titles(careers: &[Value]) -> Vec<&str> {
        careers.iter().map(|c| c["title"].as_str().unwrap()).collect()
    }

    #[test]
    fn test_no_matches_gives_generic_pair() {
        let careers = fallback_careers(&strings(&["gardening"]), &[]);
        assert_eq!(
            titles(&careers),
            vec!["Digital Marketing Specialist", "Project Coordinator"]
        );
    }

    #[test]
    fn test_keywords_match_case_insensitively() {
        let careers = fallback_careers(&strings(&["Design"]), &strings(&["PYTHON"]));
        assert_eq!(
            titles(&careers),
            vec![
                "Software Developer",
                "UI/UX Designer",
                "Digital Marketing Specialist",
                "Project Coordinator"
            ]
        );
    }

    #[test]
    fn test_three_buckets_skip_generic() {
        let careers = fallback_careers(&strings(&["art", "math"]), &strings(&["writing"]));
        assert_eq!(
            titles(&careers),
            vec!["UI/UX Designer", "Data Analyst", "Content Writer"]
        );
    }

    #[test]
    fn test_all_buckets_capped_at_five() {
        let careers = fallback_careers(
            &strings(&["coding", "ux", "business", "data", "english"]),
            &[],
        );
        assert_eq!(careers.len(), MAX_CAREERS);
        assert_eq!(careers[4]["title"], "Content Writer");
        assert_eq!(careers[0]["roadmap"].as_array().unwrap().len(), 7);
    }

    #[test]
    fn test_keyword_must_match_whole_term() {
        let careers = fallback_careers(&strings(&["web design"]), &[]);
        assert!(!titles(&careers).contains(&"UI/UX Designer"));
    }
}
