//! JD Match Calculator: lexical overlap between a resume and a job
//! description.
//!
//! Produces two independent numbers from the same pair of ratios:
//! - `ats_points` (0–30): `floor(skill_ratio × 15) + floor(keyword_ratio × 15)`
//! - `jd_match_pct` (0–100): `floor(mean(skill_ratio, keyword_ratio) × 100)`

use std::collections::{BTreeSet, HashSet};

use crate::annotation::{AnnotationError, Annotator};
use crate::scoring::keywords::{extract_keywords, DEFAULT_MIN_WORD_LENGTH};
use crate::scoring::skills::extract_skills;
use crate::scoring::vocabulary::SkillVocabulary;

/// Job descriptions shorter than this (after trimming) count as absent.
pub const MIN_JD_LENGTH: usize = 10;

/// Points available to each of the two ratios.
const RATIO_POINTS: f64 = 15.0;
/// Ceiling on the combined contribution.
pub const MAX_JD_POINTS: u32 = 30;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JdMatch {
    pub ats_points: u32,
    pub jd_match_pct: u32,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub skill_match_ratio: f64,
    pub keyword_match_ratio: f64,
    pub skill_points: u32,
    pub keyword_points: u32,
}

/// True when the job description is long enough to be scored against.
pub fn has_job_description(job_description: &str) -> bool {
    job_description.trim().chars().count() >= MIN_JD_LENGTH
}

/// Compares a resume against a job description.
///
/// A missing or too-short JD is not an error: the result is all zeros and
/// the annotation engine is never called.
pub async fn calculate_jd_match(
    annotator: &dyn Annotator,
    vocabulary: &SkillVocabulary,
    resume_text: &str,
    jd_text: &str,
    resume_skills: &[String],
) -> Result<JdMatch, AnnotationError> {
    if !has_job_description(jd_text) {
        return Ok(JdMatch::default());
    }

    let resume_keywords =
        extract_keywords(annotator, vocabulary, resume_text, DEFAULT_MIN_WORD_LENGTH).await?;
    let jd_keywords =
        extract_keywords(annotator, vocabulary, jd_text, DEFAULT_MIN_WORD_LENGTH).await?;
    let jd_skills = extract_skills(vocabulary, jd_text);

    Ok(compare(
        &resume_keywords,
        &jd_keywords,
        resume_skills,
        &jd_skills,
    ))
}

/// Ratio math over already-extracted sets.
pub fn compare(
    resume_keywords: &HashSet<String>,
    jd_keywords: &HashSet<String>,
    resume_skills: &[String],
    jd_skills: &[String],
) -> JdMatch {
    let resume_skills: BTreeSet<&str> = resume_skills.iter().map(String::as_str).collect();
    let jd_skills: BTreeSet<&str> = jd_skills.iter().map(String::as_str).collect();

    let matching_skills: Vec<String> = jd_skills
        .intersection(&resume_skills)
        .map(|s| s.to_string())
        .collect();
    let missing_skills: Vec<String> = jd_skills
        .difference(&resume_skills)
        .map(|s| s.to_string())
        .collect();

    let skill_match_ratio = ratio(matching_skills.len(), jd_skills.len());
    let shared_keywords = jd_keywords.intersection(resume_keywords).count();
    let keyword_match_ratio = ratio(shared_keywords, jd_keywords.len());

    let skill_points = (skill_match_ratio * RATIO_POINTS) as u32;
    let keyword_points = (keyword_match_ratio * RATIO_POINTS) as u32;
    let jd_match_pct = (((skill_match_ratio + keyword_match_ratio) / 2.0) * 100.0) as u32;

    JdMatch {
        ats_points: (skill_points + keyword_points).min(MAX_JD_POINTS),
        jd_match_pct,
        matching_skills,
        missing_skills,
        skill_match_ratio,
        keyword_match_ratio,
        skill_points,
        keyword_points,
    }
}

/// `part / whole`, defined as 0 for an empty whole.
fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
