pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API. Oversized text is truncated by the analyzer, so the
        // JSON route takes bodies of any size.
        .route(
            "/analyze",
            post(handlers::handle_analyze).layer(DefaultBodyLimit::disable()),
        )
        .route(
            "/analyze/upload",
            post(handlers::handle_analyze_upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::pdf::testing::text_pdf;
    use crate::analysis::Analyzer;
    use crate::annotation::testing::FailingAnnotator;
    use crate::annotation::{Annotator, HeuristicAnnotator};
    use crate::config::Config;
    use crate::scoring::vocabulary::SkillVocabulary;

    const BOUNDARY: &str = "analyzer-test-boundary";

    fn test_state(annotator: Arc<dyn Annotator>) -> AppState {
        AppState {
            config: Config {
                port: 0,
                rust_log: "info".to_string(),
                skills_file: None,
                annotator_url: None,
                annotator_timeout_secs: 30,
                max_upload_bytes: 1024 * 1024,
            },
            analyzer: Analyzer::new(Arc::new(SkillVocabulary::default()), annotator),
        }
    }

    fn app() -> Router {
        build_router(test_state(Arc::new(HeuristicAnnotator::new())))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Builds a multipart body from (name, filename, content type, bytes) parts.
    fn multipart_request(parts: &[(&str, Option<&str>, Option<&str>, &[u8])]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, filename, content_type, data) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            let mut disposition = format!("Content-Disposition: form-data; name=\"{name}\"");
            if let Some(filename) = filename {
                disposition.push_str(&format!("; filename=\"{filename}\""));
            }
            body.extend_from_slice(disposition.as_bytes());
            body.extend_from_slice(b"\r\n");
            if let Some(content_type) = content_type {
                body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
            }
            body.extend_from_slice(b"\r\n");
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/analyze/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["annotator"], "heuristic");
        assert!(body["skills"].as_u64().unwrap() > 200);
    }

    #[tokio::test]
    async fn test_analyze_returns_full_response() {
        let response = app()
            .oneshot(json_request(
                "/analyze",
                json!({
                    "text": "Python developer with 5 years of experience. Bachelor degree in Computer Science. Email: x@y.com"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let skills: Vec<&str> = body["skills"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s.as_str().unwrap())
            .collect();
        assert!(skills.contains(&"python"));
        assert_eq!(body["jd_match_score"], 0);
        assert_eq!(body["matching_skills"], json!([]));
        assert_eq!(body["missing_skills"], json!([]));
        assert!(body["ats_score"].as_u64().unwrap() <= 100);
        assert!(body["entities"].is_array());
        assert!(body["summary"].as_str().unwrap().starts_with("Python developer"));
    }

    #[tokio::test]
    async fn test_analyze_with_job_description() {
        let response = app()
            .oneshot(json_request(
                "/analyze",
                json!({
                    "text": "Skills: python, react",
                    "job_description": "Hiring for python, react, kubernetes"
                }),
            ))
            .await
            .unwrap();

        let body = body_json(response).await;
        let missing = body["missing_skills"].as_array().unwrap();
        assert!(missing.contains(&json!("kubernetes")));
        assert!(body["jd_match_score"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_analyze_accepts_body_over_default_limit() {
        // ~2.8 MB, above axum's 2 MB default body limit
        let text = "python ".repeat(400_000);
        let response = app()
            .oneshot(json_request("/analyze", json!({ "text": text })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_ne!(body["summary"], "Error analyzing resume");
        assert!(body["summary"].as_str().unwrap().chars().count() <= 600);
        assert!(body["skills"].as_array().unwrap().contains(&json!("python")));
    }

    #[tokio::test]
    async fn test_analyze_engine_failure_is_degraded_200() {
        let app = build_router(test_state(Arc::new(FailingAnnotator)));
        let response = app
            .oneshot(json_request("/analyze", json!({ "text": "Python developer" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["summary"], "Error analyzing resume");
        assert_eq!(body["ats_score"], 0);
        assert_eq!(body["skills"], json!([]));
    }

    #[tokio::test]
    async fn test_upload_without_resume_is_400() {
        let response = app()
            .oneshot(multipart_request(&[(
                "job_description",
                None,
                None,
                &b"Looking for a rust engineer"[..],
            )]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "resume file required");
    }

    #[tokio::test]
    async fn test_upload_pdf_is_scored() {
        let pdf = text_pdf("Python developer with Docker experience. Email: dev@example.com");
        let response = app()
            .oneshot(multipart_request(&[
                ("resume", Some("resume.pdf"), Some("application/pdf"), pdf.as_slice()),
                (
                    "job_description",
                    None,
                    None,
                    &b"Hiring a python engineer who knows docker and kubernetes"[..],
                ),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let skills = body["skills"].as_array().unwrap();
        assert!(skills.contains(&json!("python")));
        assert!(skills.contains(&json!("docker")));
        assert!(body["summary"].as_str().unwrap().contains("Python developer"));
        assert!(body["missing_skills"].as_array().unwrap().contains(&json!("kubernetes")));
        assert!(body["jd_match_score"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_upload_over_limit_is_413() {
        // test_state caps uploads at 1 MiB
        let oversized = vec![b'x'; 2 * 1024 * 1024];
        let response = app()
            .oneshot(multipart_request(&[(
                "resume",
                Some("resume.pdf"),
                Some("application/pdf"),
                oversized.as_slice(),
            )]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_upload_with_unreadable_pdf_is_422() {
        let response = app()
            .oneshot(multipart_request(&[(
                "resume",
                Some("resume.pdf"),
                Some("application/pdf"),
                &b"not really a pdf"[..],
            )]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
