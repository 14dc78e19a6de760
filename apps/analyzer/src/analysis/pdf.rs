//! PDF text extraction for uploaded resumes.

use tracing::{info, warn};

use crate::errors::AppError;

/// Extracts plain text from an in-memory PDF.
///
/// Runs on the blocking pool; a parser error or a parser panic both surface
/// as `UnprocessableEntity`.
pub async fn extract_text(bytes: Vec<u8>) -> Result<String, AppError> {
    let size = bytes.len();

    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| {
            warn!("PDF extraction aborted ({size} bytes): {e}");
            AppError::UnprocessableEntity("Failed to extract text from PDF".to_string())
        })?
        .map_err(|e| {
            warn!("PDF extraction failed ({size} bytes): {e}");
            AppError::UnprocessableEntity("Failed to extract text from PDF".to_string())
        })?;

    if extracted.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No text could be extracted from PDF".to_string(),
        ));
    }

    info!(
        "Extracted {} characters from {size} byte PDF",
        extracted.chars().count()
    );
    Ok(extracted)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_extracts_text_from_pdf() {
        let pdf = testing::text_pdf("Rust engineer with Docker experience");
        let text = extract_text(pdf).await.unwrap();
        assert!(text.contains("Rust engineer"));
        assert!(text.contains("Docker"));
    }

    #[tokio::test]
    async fn test_non_pdf_bytes_are_unprocessable() {
        let result = extract_text(b"definitely not a pdf".to_vec()).await;
        assert!(matches!(result, Err(AppError::UnprocessableEntity(_))));
    }

    #[tokio::test]
    async fn test_empty_upload_is_unprocessable() {
        let result = extract_text(Vec::new()).await;
        assert!(matches!(result, Err(AppError::UnprocessableEntity(_))));
    }
}
