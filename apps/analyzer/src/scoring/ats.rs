//! ATS Score Composer: combines skill density, background signals, resume
//! structure and (optionally) job-description match into one 0–100 score.
//!
//! Point budgets depend on whether a job description was supplied:
//!
//! | Factor                     | With JD | Without JD |
//! |----------------------------|---------|------------|
//! | Skill count                | 30      | 40         |
//! | Experience/education/certs | 25      | 30         |
//! | Structure sections         | 15      | 30         |
//! | JD match                   | 30      | 0          |
//!
//! The background weights (0.48 + 0.48 + 0.24) add up to 120% of their
//! budget. Nothing caps that factor locally; only the final clamp to 100
//! does.

use crate::annotation::{AnnotationError, Annotator};
use crate::models::analysis::Entity;
use crate::scoring::jd_match::{calculate_jd_match, has_job_description, JdMatch};
use crate::scoring::vocabulary::SkillVocabulary;

pub const MAX_ATS_SCORE: u32 = 100;

const EXPERIENCE_KEYWORDS: &[&str] = &[
    "experience",
    "work history",
    "employment",
    "worked at",
    "position",
    "role",
    "job",
];

const EDUCATION_KEYWORDS: &[&str] = &[
    "education",
    "degree",
    "university",
    "college",
    "bachelor",
    "master",
    "phd",
    "diploma",
    "graduated",
];

const CERTIFICATION_KEYWORDS: &[&str] = &["certification", "certified", "certificate", "license"];

const EXPERIENCE_WEIGHT: f64 = 0.48;
const EDUCATION_WEIGHT: f64 = 0.48;
const CERTIFICATION_WEIGHT: f64 = 0.24;

/// (minimum skill count, fraction of the skill budget)
const SKILL_TIERS: &[(usize, f64)] = &[(10, 1.0), (7, 0.875), (5, 0.75), (3, 0.5), (1, 0.25)];

/// (minimum sections found, fraction of the structure budget)
const SECTION_TIERS: &[(usize, f64)] = &[(5, 1.0), (4, 0.833), (3, 0.667), (2, 0.5), (1, 0.333)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Summary,
    Projects,
    Skills,
    Contact,
    Achievements,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Summary,
        Section::Projects,
        Section::Skills,
        Section::Contact,
        Section::Achievements,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Section::Summary => &["summary", "objective", "profile", "about"],
            Section::Projects => &["projects", "portfolio", "work samples"],
            Section::Skills => &["skills", "technical skills", "competencies", "expertise"],
            Section::Contact => &["email", "phone", "linkedin", "github", "contact"],
            Section::Achievements => &["achievements", "awards", "honors", "accomplishments"],
        }
    }
}

/// Point budgets for one scoring mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointBudget {
    pub skills: u32,
    pub background: u32,
    pub structure: u32,
    pub jd_match: u32,
}

impl PointBudget {
    pub const WITH_JD: PointBudget = PointBudget {
        skills: 30,
        background: 25,
        structure: 15,
        jd_match: 30,
    };

    pub const WITHOUT_JD: PointBudget = PointBudget {
        skills: 40,
        background: 30,
        structure: 30,
        jd_match: 0,
    };

    pub fn for_mode(has_jd: bool) -> Self {
        if has_jd {
            Self::WITH_JD
        } else {
            Self::WITHOUT_JD
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackgroundSignals {
    pub has_experience: bool,
    pub has_education: bool,
    pub has_certifications: bool,
}

/// Points awarded per factor, before the final clamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreComponents {
    pub skills: u32,
    pub background: u32,
    pub structure: u32,
    pub jd_match: u32,
}

impl ScoreComponents {
    pub fn total(&self) -> u32 {
        self.skills + self.background + self.structure + self.jd_match
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub ats_score: u32,
    pub jd_match_score: u32,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub has_jd: bool,
    pub components: ScoreComponents,
    pub background: BackgroundSignals,
    pub sections: Vec<Section>,
}

/// Scores a resume.
///
/// `entities` is accepted for interface compatibility but is not factored
/// into any branch of the score.
pub async fn calculate_ats_score(
    annotator: &dyn Annotator,
    vocabulary: &SkillVocabulary,
    text: &str,
    skills: &[String],
    _entities: &[Entity],
    job_description: &str,
) -> Result<ScoreBreakdown, AnnotationError> {
    let text_lower = text.to_lowercase();
    let has_jd = has_job_description(job_description);
    let budget = PointBudget::for_mode(has_jd);

    let background = detect_background(&text_lower);
    let sections = detect_sections(&text_lower);

    let jd = if has_jd {
        calculate_jd_match(annotator, vocabulary, text, job_description, skills).await?
    } else {
        JdMatch::default()
    };

    let components = ScoreComponents {
        skills: skill_points(skills.len(), budget.skills),
        background: background_points(background, budget.background),
        structure: structure_points(sections.len(), budget.structure),
        jd_match: jd.ats_points,
    };

    Ok(ScoreBreakdown {
        ats_score: components.total().min(MAX_ATS_SCORE),
        jd_match_score: jd.jd_match_pct,
        matching_skills: jd.matching_skills,
        missing_skills: jd.missing_skills,
        has_jd,
        components,
        background,
        sections,
    })
}

/// `floor(max × fraction)`.
fn portion(max: u32, fraction: f64) -> u32 {
    (max as f64 * fraction) as u32
}

fn tiered(count: usize, tiers: &[(usize, f64)], max: u32) -> u32 {
    tiers
        .iter()
        .find(|(min, _)| count >= *min)
        .map(|(_, fraction)| portion(max, *fraction))
        .unwrap_or(0)
}

pub fn skill_points(skill_count: usize, max: u32) -> u32 {
    tiered(skill_count, SKILL_TIERS, max)
}

pub fn structure_points(sections_found: usize, max: u32) -> u32 {
    tiered(sections_found, SECTION_TIERS, max)
}

pub fn background_points(signals: BackgroundSignals, max: u32) -> u32 {
    let mut points = 0;
    if signals.has_experience {
        points += portion(max, EXPERIENCE_WEIGHT);
    }
    if signals.has_education {
        points += portion(max, EDUCATION_WEIGHT);
    }
    if signals.has_certifications {
        points += portion(max, CERTIFICATION_WEIGHT);
    }
    points
}

fn contains_any(text_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text_lower.contains(k))
}

pub fn detect_background(text_lower: &str) -> BackgroundSignals {
    BackgroundSignals {
        has_experience: contains_any(text_lower, EXPERIENCE_KEYWORDS),
        has_education: contains_any(text_lower, EDUCATION_KEYWORDS),
        has_certifications: contains_any(text_lower, CERTIFICATION_KEYWORDS),
    }
}

/// Sections with at least one keyword present, in `Section::ALL` order.
pub fn detect_sections(text_lower: &str) -> Vec<Section> {
    Section::ALL
        .into_iter()
        .filter(|s| contains_any(text_lower, s.keywords()))
        .collect()
}
