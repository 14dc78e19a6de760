//! Remote annotation engine: HTTP client for an external NLP service.
//!
//! Wire contract: `POST {url}` with `{"text": "..."}`; the service answers
//! with an `Annotation` document (`{"tokens": [...], "entities": [...]}`).
//! Retries on transport errors, 429 and 5xx with exponential backoff.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::annotation::{Annotation, AnnotationError, Annotator};

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Serialize)]
struct AnnotateRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    #[serde(alias = "detail")]
    error: String,
}

#[derive(Clone)]
pub struct RemoteAnnotator {
    client: Client,
    url: String,
}

impl RemoteAnnotator {
    pub fn new(url: String, timeout: Duration) -> Result<Self, AnnotationError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Annotator for RemoteAnnotator {
    async fn annotate(&self, text: &str) -> Result<Annotation, AnnotationError> {
        let request_body = AnnotateRequest { text };
        let mut last_error: Option<AnnotationError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Annotation attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&self.url).json(&request_body).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(AnnotationError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Annotation service returned {}: {}", status, body);
                last_error = Some(AnnotationError::Service {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AnnotationError::Service {
                    status: status.as_u16(),
                    message: error_message(body),
                });
            }

            let body = response.text().await?;
            let annotation: Annotation = serde_json::from_str(&body)?;

            debug!(
                "Annotation succeeded: tokens={}, entities={}",
                annotation.tokens.len(),
                annotation.entities.len()
            );

            return Ok(annotation);
        }

        Err(last_error.unwrap_or(AnnotationError::Exhausted {
            retries: MAX_RETRIES,
        }))
    }

    fn backend(&self) -> &'static str {
        "remote"
    }
}

/// Pulls the message out of `{"error": ...}` / `{"detail": ...}` bodies,
/// falling back to the raw body.
fn error_message(body: String) -> String {
    serde_json::from_str::<ServiceError>(&body)
        .map(|e| e.error)
        .unwrap_or(body)
}
