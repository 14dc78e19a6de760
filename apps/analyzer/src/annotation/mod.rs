//! Annotation engine seam: part-of-speech tags, lemmas, stop-word flags and
//! named entities for a piece of text.
//!
//! The scoring core only ever sees the explicit structures below. Engines are
//! pluggable behind the `Annotator` trait and carried in `AppState` as
//! `Arc<dyn Annotator>`:
//! - `HeuristicAnnotator`: in-process, rule-based (default).
//! - `RemoteAnnotator`: HTTP client for an external NLP service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod heuristic;
pub mod remote;

pub use heuristic::HeuristicAnnotator;
pub use remote::RemoteAnnotator;

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Annotation service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Annotation service unavailable after {retries} attempts")]
    Exhausted { retries: u32 },

    #[error("Blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

// ────────────────────────────────────────────────────────────────────────────
// Boundary data model
// ────────────────────────────────────────────────────────────────────────────

/// Coarse part-of-speech tag. Only nouns and proper nouns matter to scoring;
/// every other tag is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Other(String),
}

impl PartOfSpeech {
    pub fn as_str(&self) -> &str {
        match self {
            PartOfSpeech::Noun => "NOUN",
            PartOfSpeech::ProperNoun => "PROPN",
            PartOfSpeech::Other(tag) => tag,
        }
    }

    pub fn is_nominal(&self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::ProperNoun)
    }
}

impl From<String> for PartOfSpeech {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "NOUN" => PartOfSpeech::Noun,
            "PROPN" => PartOfSpeech::ProperNoun,
            _ => PartOfSpeech::Other(tag),
        }
    }
}

impl From<PartOfSpeech> for String {
    fn from(pos: PartOfSpeech) -> Self {
        pos.as_str().to_string()
    }
}

/// Named-entity category. The four named variants are the ones keyword
/// extraction looks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityLabel {
    Organization,
    Product,
    Skill,
    Language,
    Other(String),
}

impl EntityLabel {
    pub fn as_str(&self) -> &str {
        match self {
            EntityLabel::Organization => "ORG",
            EntityLabel::Product => "PRODUCT",
            EntityLabel::Skill => "SKILL",
            EntityLabel::Language => "LANGUAGE",
            EntityLabel::Other(label) => label,
        }
    }

    /// Labels whose entity text counts as a keyword.
    pub fn is_keyword_category(&self) -> bool {
        !matches!(self, EntityLabel::Other(_))
    }
}

impl From<String> for EntityLabel {
    fn from(label: String) -> Self {
        match label.as_str() {
            "ORG" => EntityLabel::Organization,
            "PRODUCT" => EntityLabel::Product,
            "SKILL" => EntityLabel::Skill,
            "LANGUAGE" => EntityLabel::Language,
            _ => EntityLabel::Other(label),
        }
    }
}

impl From<EntityLabel> for String {
    fn from(label: EntityLabel) -> Self {
        label.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub pos: PartOfSpeech,
    pub lemma: String,
    pub is_stop: bool,
}

impl Token {
    /// Surface length in characters.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Entity span. `start`/`end` are character offsets into the annotated text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedSpan {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub entities: Vec<AnnotatedSpan>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// An annotation engine. Implementations must be safe for concurrent
/// read-only use after construction.
#[async_trait]
pub trait Annotator: Send + Sync {
    async fn annotate(&self, text: &str) -> Result<Annotation, AnnotationError>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// Test engines
// ────────────────────────────────────────────────────────────────────────────
