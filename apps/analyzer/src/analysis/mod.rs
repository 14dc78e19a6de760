// Analysis pipeline: truncate → annotate → extract → score → respond.
// A failure anywhere (engine error or panic) yields the degraded response,
// never an HTTP error.

pub mod handlers;
pub mod pdf;

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::annotation::{AnnotationError, Annotator};
use crate::models::analysis::{AnalyzeRequest, AnalyzeResponse, Entity};
use crate::scoring::ats::calculate_ats_score;
use crate::scoring::skills::extract_skills;
use crate::scoring::summary::{simple_summary, MAX_SUMMARY_CHARS};
use crate::scoring::vocabulary::SkillVocabulary;

/// Upper bound on characters processed per text field.
pub const MAX_TEXT_LENGTH: usize = 100_000;

/// Shared, read-only scoring context. Cheap to clone.
#[derive(Clone)]
pub struct Analyzer {
    vocabulary: Arc<SkillVocabulary>,
    annotator: Arc<dyn Annotator>,
}

impl Analyzer {
    pub fn new(vocabulary: Arc<SkillVocabulary>, annotator: Arc<dyn Annotator>) -> Self {
        Self {
            vocabulary,
            annotator,
        }
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    pub fn backend(&self) -> &'static str {
        self.annotator.backend()
    }

    /// Analyzes a resume. Always returns a valid response.
    ///
    /// The work runs in its own task so that a panic inside the annotation
    /// engine is contained to this request.
    pub async fn analyze(&self, request: AnalyzeRequest) -> AnalyzeResponse {
        let analysis_id = Uuid::new_v4();
        let analyzer = self.clone();
        let task = tokio::spawn(async move { analyzer.run(request).await });

        match task.await {
            Ok(Ok(response)) => {
                info!(
                    %analysis_id,
                    ats_score = response.ats_score,
                    jd_match_score = response.jd_match_score,
                    skills = response.skills.len(),
                    entities = response.entities.len(),
                    "Resume analyzed"
                );
                response
            }
            Ok(Err(e)) => {
                error!(%analysis_id, "Error analyzing resume: {e}");
                AnalyzeResponse::degraded()
            }
            Err(e) => {
                error!(%analysis_id, "Analysis task aborted: {e}");
                AnalyzeResponse::degraded()
            }
        }
    }

    /// The pipeline proper; errors propagate to `analyze`.
    pub async fn run(&self, request: AnalyzeRequest) -> Result<AnalyzeResponse, AnnotationError> {
        let text = truncate_chars(&request.text, MAX_TEXT_LENGTH);
        let job_description = truncate_chars(&request.job_description, MAX_TEXT_LENGTH);

        let annotation = self.annotator.annotate(text).await?;
        let entities: Vec<Entity> = annotation.entities.into_iter().map(Entity::from).collect();

        // Vocabulary scan over up to MAX_TEXT_LENGTH chars: keep it off the workers
        let vocabulary = Arc::clone(&self.vocabulary);
        let owned_text = text.to_string();
        let (skills, summary) = tokio::task::spawn_blocking(move || {
            (
                extract_skills(&vocabulary, &owned_text),
                simple_summary(&owned_text, MAX_SUMMARY_CHARS),
            )
        })
        .await?;

        let breakdown = calculate_ats_score(
            self.annotator.as_ref(),
            &self.vocabulary,
            text,
            &skills,
            &entities,
            job_description,
        )
        .await?;

        debug!(
            has_jd = breakdown.has_jd,
            skill_points = breakdown.components.skills,
            background_points = breakdown.components.background,
            structure_points = breakdown.components.structure,
            jd_points = breakdown.components.jd_match,
            sections = breakdown.sections.len(),
            "ATS score components"
        );

        Ok(AnalyzeResponse {
            entities,
            skills,
            summary,
            ats_score: breakdown.ats_score,
            jd_match_score: breakdown.jd_match_score,
            matching_skills: breakdown.matching_skills,
            missing_skills: breakdown.missing_skills,
        })
    }
}

/// Silently caps `text` at `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => {
            warn!(
                "Text too long ({} chars), truncating to {max_chars}",
                text.chars().count()
            );
            &text[..idx]
        }
        None => text,
    }
}
