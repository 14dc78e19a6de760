//! Skill Extractor: vocabulary terms found anywhere in the document.

use crate::scoring::vocabulary::SkillVocabulary;

/// Returns the sorted, distinct vocabulary terms contained in `text`.
///
/// Matching is plain substring containment on the lowercased text, with no
/// token boundaries: "c" matches inside "vaccine". That imprecision is part
/// of how resumes have always been scored here and is kept as-is.
pub fn extract_skills(vocabulary: &SkillVocabulary, text: &str) -> Vec<String> {
    let text_lower = text.to_lowercase();
    vocabulary
        .matches_in(&text_lower)
        .map(str::to_string)
        .collect()
}
