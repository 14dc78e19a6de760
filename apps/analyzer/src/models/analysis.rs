use serde::{Deserialize, Serialize};

use crate::annotation::AnnotatedSpan;

pub const DEGRADED_SUMMARY: &str = "Error analyzing resume";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub job_description: String,
}

/// Named entity as returned to clients. Offsets are in characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
    pub start: usize,
    pub end: usize,
    pub score: f32,
}

impl From<AnnotatedSpan> for Entity {
    fn from(span: AnnotatedSpan) -> Self {
        Entity {
            text: span.text,
            label: span.label.into(),
            start: span.start,
            end: span.end,
            score: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub entities: Vec<Entity>,
    pub skills: Vec<String>,
    pub summary: String,
    pub ats_score: u32,
    pub jd_match_score: u32,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

impl AnalyzeResponse {
    /// Safe, empty result returned when analysis fails.
    pub fn degraded() -> Self {
        AnalyzeResponse {
            entities: vec![],
            skills: vec![],
            summary: DEGRADED_SUMMARY.to_string(),
            ats_score: 0,
            jd_match_score: 0,
            matching_skills: vec![],
            missing_skills: vec![],
        }
    }
}
