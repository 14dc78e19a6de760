//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::{info, warn};

use crate::analysis::pdf::extract_text;
use crate::errors::AppError;
use crate::models::analysis::{AnalyzeRequest, AnalyzeResponse};
use crate::state::AppState;

/// POST /analyze
///
/// Scores raw resume text against an optional job description. Analysis
/// failures produce a degraded 200 response, not an error status.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<AnalyzeResponse> {
    log_request(&request);
    Json(state.analyzer.analyze(request).await)
}

/// POST /analyze/upload
///
/// Multipart form: `resume` (PDF file, required), `job_description` (text,
/// optional). The PDF is converted to text and scored like `/analyze`.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut resume: Option<Vec<u8>> = None;
    let mut job_description = String::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                if field.content_type() != Some("application/pdf") {
                    warn!(
                        "Resume content type is {:?}, expected application/pdf",
                        field.content_type()
                    );
                }
                resume = Some(field.bytes().await?.to_vec());
            }
            Some("job_description") => {
                job_description = field.text().await?;
            }
            _ => {}
        }
    }

    let bytes = resume.ok_or_else(|| AppError::Validation("resume file required".to_string()))?;
    let text = extract_text(bytes).await?;

    let request = AnalyzeRequest {
        text,
        job_description,
    };
    log_request(&request);

    Ok(Json(state.analyzer.analyze(request).await))
}

/// Input sizes in characters: (resume text, job description).
fn input_chars(request: &AnalyzeRequest) -> (usize, usize) {
    (
        request.text.chars().count(),
        request.job_description.chars().count(),
    )
}

fn log_request(request: &AnalyzeRequest) {
    let (text_chars, jd_chars) = input_chars(request);
    info!(text_chars, jd_chars, "Analyzing resume");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_chars_counts_characters_not_bytes() {
        let request = AnalyzeRequest {
            text: "Résumé: café".to_string(),
            job_description: String::new(),
        };
        assert_eq!(input_chars(&request), (12, 0));
    }

    #[test]
    fn test_input_chars_includes_job_description() {
        let request = AnalyzeRequest {
            text: "rust".to_string(),
            job_description: "naïve parser work".to_string(),
        };
        assert_eq!(input_chars(&request), (4, 17));
    }
}
