//! Keyword Extractor: nouns, proper nouns and selected entities from the
//! annotation engine, plus every vocabulary hit.

use std::collections::HashSet;

use crate::annotation::{Annotation, AnnotationError, Annotator};
use crate::scoring::vocabulary::SkillVocabulary;

pub const DEFAULT_MIN_WORD_LENGTH: usize = 3;

/// Lowercases `text`, annotates it and collects its keyword set.
pub async fn extract_keywords(
    annotator: &dyn Annotator,
    vocabulary: &SkillVocabulary,
    text: &str,
    min_word_length: usize,
) -> Result<HashSet<String>, AnnotationError> {
    let text_lower = text.to_lowercase();
    let annotation = annotator.annotate(&text_lower).await?;
    Ok(collect_keywords(
        &annotation,
        &text_lower,
        vocabulary,
        min_word_length,
    ))
}

/// Keyword selection over an annotation of `text_lower`:
/// - lemmas of non-stop nouns/proper nouns with surface length ≥ `min_word_length`
/// - lowercased text of ORG / PRODUCT / SKILL / LANGUAGE entities
/// - vocabulary terms contained in `text_lower`, so skills count even when
///   tagging misses them
pub fn collect_keywords(
    annotation: &Annotation,
    text_lower: &str,
    vocabulary: &SkillVocabulary,
    min_word_length: usize,
) -> HashSet<String> {
    let mut keywords = HashSet::new();

    for token in &annotation.tokens {
        if token.pos.is_nominal() && token.char_count() >= min_word_length && !token.is_stop {
            keywords.insert(token.lemma.clone());
        }
    }

    for entity in &annotation.entities {
        if entity.label.is_keyword_category() {
            keywords.insert(entity.text.to_lowercase());
        }
    }

    keywords.extend(vocabulary.matches_in(text_lower).map(str::to_string));

    keywords
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::testing::{span, token, FailingAnnotator, StaticAnnotator};
    use crate::annotation::HeuristicAnnotator;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_only_non_stop_nouns_long_enough() {
        let annotation = Annotation {
            tokens: vec![
                token("engineers", "NOUN", "engineer", false),
                token("google", "PROPN", "google", false),
                token("built", "VERB", "build", false),
                token("api", "NOUN", "api", false),
                token("ux", "NOUN", "ux", false),
                token("thing", "NOUN", "thing", true),
            ],
            entities: vec![],
        };

        let keywords = collect_keywords(&annotation, "", &SkillVocabulary::from_terms(["zig"]), 3);
        assert_eq!(keywords, set(&["engineer", "google", "api"]));
    }

    #[test]
    fn test_min_word_length_uses_surface_not_lemma() {
        let annotation = Annotation {
            tokens: vec![token("uis", "NOUN", "ui", false)],
            entities: vec![],
        };
        let keywords = collect_keywords(&annotation, "", &SkillVocabulary::from_terms(["zig"]), 3);
        assert_eq!(keywords, set(&["ui"]));
    }

    #[test]
    fn test_entity_allow_list() {
        let annotation = Annotation {
            tokens: vec![],
            entities: vec![
                span("Acme Corp", "ORG", 0),
                span("iPhone", "PRODUCT", 10),
                span("Rust", "SKILL", 20),
                span("Spanish", "LANGUAGE", 30),
                span("Jane Doe", "PERSON", 40),
                span("2020", "DATE", 50),
            ],
        };
        let keywords = collect_keywords(&annotation, "", &SkillVocabulary::from_terms(["zig"]), 3);
        assert_eq!(keywords, set(&["acme corp", "iphone", "rust", "spanish"]));
    }

    #[test]
    fn test_vocabulary_hits_are_unioned() {
        let vocab = SkillVocabulary::from_terms(["python", "react", "kubernetes"]);
        let keywords = collect_keywords(&Annotation::default(), "python and react", &vocab, 3);
        assert_eq!(keywords, set(&["python", "react"]));
    }

    #[tokio::test]
    async fn test_extract_keywords_lowercases_before_matching() {
        let vocab = SkillVocabulary::from_terms(["docker"]);
        let keywords = extract_keywords(&StaticAnnotator::empty(), &vocab, "DOCKER expert", 3)
            .await
            .unwrap();
        assert_eq!(keywords, set(&["docker"]));
    }

    #[tokio::test]
    async fn test_extract_keywords_with_heuristic_engine() {
        let vocab = SkillVocabulary::from_terms(["python"]);
        let keywords = extract_keywords(
            &HeuristicAnnotator::new(),
            &vocab,
            "Built data pipelines in Python for the payments team",
            DEFAULT_MIN_WORD_LENGTH,
        )
        .await
        .unwrap();

        assert!(keywords.contains("python"));
        assert!(keywords.contains("pipeline"));
        assert!(keywords.contains("payment"));
        assert!(!keywords.contains("the"));
        assert!(!keywords.contains("built"));
    }

    #[tokio::test]
    async fn test_extract_keywords_propagates_engine_failure() {
        let result =
            extract_keywords(&FailingAnnotator, &SkillVocabulary::default(), "python", 3).await;
        assert!(result.is_err());
    }
}
