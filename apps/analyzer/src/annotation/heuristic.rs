//! Rule-based annotation engine. No model files, no network.
//!
//! Tokens are maximal runs of alphanumeric characters (plus `+` and `#`, so
//! "c++" and "c#" survive). Tagging is lexical: closed-class word lists,
//! a handful of suffix rules, capitalization for proper nouns, and noun as
//! the fallback. Entities cover ORG, LANGUAGE, DATE, PERCENT and CARDINAL;
//! PRODUCT and SKILL are never produced.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use stop_words::{get, LANGUAGE};

use crate::annotation::{
    AnnotatedSpan, Annotation, AnnotationError, Annotator, EntityLabel, PartOfSpeech, Token,
};

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "all", "both", "either", "neither", "another", "such",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "we", "us", "our", "ours", "you", "your", "yours", "he",
    "him", "his", "she", "her", "hers", "it", "its", "they", "them", "their", "theirs", "who",
    "whom", "whose", "which", "what",
];

const ADPOSITIONS: &[&str] = &[
    "in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "to", "from", "up", "down", "of", "off",
    "over", "under", "across", "within", "without", "via", "per", "among", "throughout",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "so", "yet", "because", "although", "while", "whereas", "if",
    "unless", "than", "whether",
];

const AUXILIARIES: &[&str] = &[
    "is", "am", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
];

/// Action verbs that dominate resume bullets and would otherwise be tagged
/// as nouns by the fallback rule.
const VERBS: &[&str] = &[
    "build", "builds", "develop", "develops", "design", "designs", "lead", "leads", "led",
    "manage", "manages", "create", "creates", "implement", "implements", "architect",
    "deliver", "delivers", "drive", "drives", "own", "owns", "work", "works", "write",
    "wrote", "written", "collaborate", "mentor", "maintain", "maintains", "optimize",
    "improve", "migrate", "deploy", "automate", "ship", "shipped", "join", "help", "support",
    "built", "made", "ran", "grew", "drove", "won", "began", "held", "taught", "sold",
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ful", "ous", "able", "ible"];

/// Words whose presence inside a capitalized run marks it as an organization.
const ORG_MARKERS: &[&str] = &[
    "university", "college", "institute", "school", "academy", "inc", "llc", "ltd", "corp",
    "corporation", "company", "co", "labs", "technologies", "systems", "solutions", "group",
    "foundation", "bank", "agency",
];

const ORG_CONNECTORS: &[&str] = &["of", "and", "for", "the"];

const LANGUAGES: &[&str] = &[
    "english", "spanish", "french", "german", "italian", "portuguese", "dutch", "russian",
    "mandarin", "cantonese", "chinese", "japanese", "korean", "hindi", "bengali", "urdu",
    "arabic", "turkish", "persian", "polish", "swedish", "norwegian", "danish", "finnish",
    "greek", "hebrew", "vietnamese", "thai", "indonesian", "malay", "tamil", "telugu",
    "marathi", "punjabi", "gujarati", "swahili", "ukrainian",
];

const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep",
    "sept", "oct", "nov", "dec",
];

/// A token as located in the source text, before tagging.
#[derive(Debug)]
struct RawToken<'a> {
    text: &'a str,
    start: usize,
    end: usize,
    byte_start: usize,
    byte_end: usize,
    sentence_initial: bool,
}

impl RawToken<'_> {
    fn is_capitalized(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
    }

    fn is_numeric(&self) -> bool {
        self.text.chars().all(|c| c.is_ascii_digit())
    }
}

/// In-process annotator. Construction loads the stop-word list once; after
/// that the engine is read-only and safe to share.
#[derive(Clone)]
pub struct HeuristicAnnotator {
    stop_words: Arc<HashSet<String>>,
}

impl Default for HeuristicAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicAnnotator {
    pub fn new() -> Self {
        let stop_words = get(LANGUAGE::English).iter().map(|s| s.to_string()).collect();
        Self {
            stop_words: Arc::new(stop_words),
        }
    }

    /// Synchronous annotation. CPU-bound; async callers go through the
    /// trait, which runs this on the blocking pool.
    pub fn annotate_text(&self, text: &str) -> Annotation {
        let raw = scan(text);

        let tokens = raw
            .iter()
            .map(|r| {
                let lower = r.text.to_lowercase();
                let pos = tag(r, &lower);
                let lemma = if pos == PartOfSpeech::Noun {
                    singularize(&lower)
                } else {
                    lower.clone()
                };
                Token {
                    text: r.text.to_string(),
                    pos,
                    lemma,
                    is_stop: self.stop_words.contains(&lower),
                }
            })
            .collect();

        Annotation {
            tokens,
            entities: recognize_entities(text, &raw),
        }
    }
}

#[async_trait]
impl Annotator for HeuristicAnnotator {
    async fn annotate(&self, text: &str) -> Result<Annotation, AnnotationError> {
        let engine = self.clone();
        let text = text.to_string();
        let annotation = tokio::task::spawn_blocking(move || engine.annotate_text(&text)).await?;
        Ok(annotation)
    }

    fn backend(&self) -> &'static str {
        "heuristic"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tokenization & tagging
// ────────────────────────────────────────────────────────────────────────────

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}

fn scan(text: &str) -> Vec<RawToken<'_>> {
    let mut tokens = Vec::new();
    // (byte_start, char_start, sentence_initial)
    let mut current: Option<(usize, usize, bool)> = None;
    let mut sentence_initial = true;
    let mut char_idx = 0;

    for (byte_idx, c) in text.char_indices() {
        if is_token_char(c) {
            if current.is_none() {
                current = Some((byte_idx, char_idx, sentence_initial));
            }
        } else {
            if let Some((byte_start, start, initial)) = current.take() {
                tokens.push(RawToken {
                    text: &text[byte_start..byte_idx],
                    start,
                    end: char_idx,
                    byte_start,
                    byte_end: byte_idx,
                    sentence_initial: initial,
                });
                sentence_initial = false;
            }
            if matches!(c, '.' | '!' | '?' | '\n') {
                sentence_initial = true;
            }
        }
        char_idx += 1;
    }

    if let Some((byte_start, start, initial)) = current {
        tokens.push(RawToken {
            text: &text[byte_start..],
            start,
            end: char_idx,
            byte_start,
            byte_end: text.len(),
            sentence_initial: initial,
        });
    }

    tokens
}

fn tag(raw: &RawToken<'_>, lower: &str) -> PartOfSpeech {
    let other = |t: &str| PartOfSpeech::Other(t.to_string());

    if !lower.chars().any(char::is_alphabetic) {
        return if lower.chars().any(|c| c.is_ascii_digit()) {
            other("NUM")
        } else {
            other("SYM")
        };
    }
    if DETERMINERS.contains(&lower) {
        return other("DET");
    }
    if PRONOUNS.contains(&lower) {
        return other("PRON");
    }
    if ADPOSITIONS.contains(&lower) {
        return other("ADP");
    }
    if CONJUNCTIONS.contains(&lower) {
        return other("CCONJ");
    }
    if AUXILIARIES.contains(&lower) {
        return other("AUX");
    }
    if VERBS.contains(&lower) {
        return other("VERB");
    }

    let len = lower.chars().count();
    if len > 4 && lower.ends_with("ly") {
        return other("ADV");
    }
    if len > 4 && lower.ends_with("ed") {
        return other("VERB");
    }
    if len > 5 && ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return other("ADJ");
    }

    if raw.is_capitalized() && !raw.sentence_initial {
        PartOfSpeech::ProperNoun
    } else {
        PartOfSpeech::Noun
    }
}

/// Strips regular English plural endings.
fn singularize(word: &str) -> String {
    let len = word.chars().count();
    if len > 4 {
        if let Some(stem) = word.strip_suffix("ies") {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix("sses") {
        return format!("{stem}ss");
    }
    if len > 3 && word.ends_with('s') && !["ss", "us", "is"].iter().any(|s| word.ends_with(s)) {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Entity recognition
// ────────────────────────────────────────────────────────────────────────────

fn span(text: &str, label: EntityLabel, first: &RawToken<'_>, last: &RawToken<'_>) -> AnnotatedSpan {
    AnnotatedSpan {
        text: text[first.byte_start..last.byte_end].to_string(),
        label,
        start: first.start,
        end: last.end,
    }
}

/// True when only spaces (or a lone ampersand) separate two tokens.
fn joined_inline(text: &str, left: &RawToken<'_>, right: &RawToken<'_>) -> bool {
    let gap = &text[left.byte_end..right.byte_start];
    !gap.is_empty() && gap.chars().all(|c| c == ' ' || c == '&')
}

fn recognize_entities(text: &str, tokens: &[RawToken<'_>]) -> Vec<AnnotatedSpan> {
    let mut entities = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let tok = &tokens[i];
        let lower = tok.text.to_lowercase();

        if tok.is_capitalized() {
            if let Some(last) = organization_run(text, tokens, i) {
                entities.push(span(text, EntityLabel::Organization, tok, &tokens[last]));
                i = last + 1;
                continue;
            }
        }

        if LANGUAGES.contains(&lower.as_str()) {
            entities.push(span(text, EntityLabel::Language, tok, tok));
        } else if tok.is_numeric() {
            entities.push(numeric_entity(text, tokens, i));
        }
        i += 1;
    }

    entities
}

/// Index of the last token of an organization name starting at `start`, if
/// the capitalized run there contains an organization marker.
fn organization_run(text: &str, tokens: &[RawToken<'_>], start: usize) -> Option<usize> {
    let mut last = start;
    let mut j = start + 1;
    while j < tokens.len() && joined_inline(text, &tokens[j - 1], &tokens[j]) {
        let lower = tokens[j].text.to_lowercase();
        if tokens[j].is_capitalized() {
            last = j;
        } else if !ORG_CONNECTORS.contains(&lower.as_str()) {
            break;
        }
        j += 1;
    }

    let has_marker = tokens[start..=last]
        .iter()
        .any(|t| ORG_MARKERS.contains(&t.text.to_lowercase().as_str()));

    (last > start && has_marker).then_some(last)
}

fn numeric_entity(text: &str, tokens: &[RawToken<'_>], i: usize) -> AnnotatedSpan {
    let tok = &tokens[i];

    if text[tok.byte_end..].starts_with('%') {
        return AnnotatedSpan {
            text: text[tok.byte_start..tok.byte_end + 1].to_string(),
            label: EntityLabel::Other("PERCENT".to_string()),
            start: tok.start,
            end: tok.end + 1,
        };
    }

    let is_year = tok.text.len() == 4
        && tok
            .text
            .parse::<u32>()
            .is_ok_and(|y| (1950..=2099).contains(&y));
    if is_year {
        let first = match i.checked_sub(1).map(|p| &tokens[p]) {
            Some(prev)
                if MONTHS.contains(&prev.text.to_lowercase().as_str())
                    && text[prev.byte_end..tok.byte_start]
                        .chars()
                        .all(|c| c == ' ' || c == ',') =>
            {
                prev
            }
            _ => tok,
        };
        return span(text, EntityLabel::Other("DATE".to_string()), first, tok);
    }

    span(text, EntityLabel::Other("CARDINAL".to_string()), tok, tok)
}
