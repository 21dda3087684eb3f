//! Fixed job board listings, inserted the first time the board is empty.

use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{Job, JobType};
use crate::store::Store;

struct Listing {
    title: &'static str,
    company: &'static str,
    location: &'static str,
    job_type: JobType,
    required_skills: &'static [&'static str],
    salary: &'static str,
    description: &'static str,
    experience_level: &'static str,
}

const LISTINGS: [Listing; 10] = [
    Listing {
        title: "Frontend Developer",
        company: "TechCorp",
        location: "Bangalore",
        job_type: JobType::Job,
        required_skills: &["React", "JavaScript", "CSS"],
        salary: "₹6-10 LPA",
        description: "Build modern web applications",
        experience_level: "Entry",
    },
    Listing {
        title: "Data Analyst",
        company: "DataHub",
        location: "Mumbai",
        job_type: JobType::Job,
        required_skills: &["Python", "SQL", "Excel"],
        salary: "₹5-8 LPA",
        description: "Analyze business data",
        experience_level: "Entry",
    },
    Listing {
        title: "UI/UX Designer",
        company: "DesignStudio",
        location: "Hyderabad",
        job_type: JobType::Job,
        required_skills: &["Figma", "Adobe XD", "Design Thinking"],
        salary: "₹4-7 LPA",
        description: "Create user interfaces",
        experience_level: "Entry",
    },
    Listing {
        title: "Python Developer",
        company: "CodeWorks",
        location: "Pune",
        job_type: JobType::Job,
        required_skills: &["Python", "Django", "FastAPI"],
        salary: "₹7-12 LPA",
        description: "Backend development",
        experience_level: "Mid",
    },
    Listing {
        title: "Content Writer",
        company: "MediaCo",
        location: "Remote",
        job_type: JobType::Job,
        required_skills: &["Writing", "SEO", "Research"],
        salary: "₹3-5 LPA",
        description: "Create engaging content",
        experience_level: "Entry",
    },
    Listing {
        title: "Marketing Intern",
        company: "StartupXYZ",
        location: "Delhi",
        job_type: JobType::Internship,
        required_skills: &["Social Media", "Marketing", "Communication"],
        salary: "₹10k-15k/month",
        description: "Digital marketing internship",
        experience_level: "Fresher",
    },
    Listing {
        title: "Software Development Intern",
        company: "TechSolutions",
        location: "Bangalore",
        job_type: JobType::Internship,
        required_skills: &["Programming", "Problem Solving"],
        salary: "₹15k-20k/month",
        description: "Learn software development",
        experience_level: "Fresher",
    },
    Listing {
        title: "Graphic Designer",
        company: "CreativeHub",
        location: "Chennai",
        job_type: JobType::Job,
        required_skills: &["Photoshop", "Illustrator", "Creativity"],
        salary: "₹4-6 LPA",
        description: "Design visual content",
        experience_level: "Entry",
    },
    Listing {
        title: "Business Analyst",
        company: "ConsultCorp",
        location: "Gurgaon",
        job_type: JobType::Job,
        required_skills: &["Analysis", "Excel", "Communication"],
        salary: "₹6-9 LPA",
        description: "Business process analysis",
        experience_level: "Mid",
    },
    Listing {
        title: "AI/ML Intern",
        company: "AILabs",
        location: "Bangalore",
        job_type: JobType::Internship,
        required_skills: &["Python", "Machine Learning", "Data Science"],
        salary: "₹20k-25k/month",
        description: "AI research internship",
        experience_level: "Fresher",
    },
];

/// The seed listings with freshly generated ids.
pub fn seed_jobs() -> Vec<Job> {
    LISTINGS
        .iter()
        .map(|l| Job {
            id: Uuid::new_v4(),
            title: l.title.to_string(),
            company: l.company.to_string(),
            location: l.location.to_string(),
            job_type: l.job_type,
            required_skills: l.required_skills.iter().map(|s| s.to_string()).collect(),
            salary: l.salary.to_string(),
            description: l.description.to_string(),
            experience_level: l.experience_level.to_string(),
        })
        .collect()
}

/// Inserts the seed listings when no job exists yet.
///
/// Check-then-insert: two concurrent first calls can both seed.
pub async fn ensure_jobs_seeded(store: &dyn Store) -> Result<(), AppError> {
    if store.count_jobs().await? > 0 {
        return Ok(());
    }
    let jobs = seed_jobs();
    store.insert_jobs(&jobs).await?;
    info!(count = jobs.len(), "Seeded job board");
    Ok(())
}
