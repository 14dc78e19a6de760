// Scoring engine: skill + keyword extraction, JD matching, ATS composition.
// Every function here is pure given the vocabulary and the annotation engine.

pub mod ats;
pub mod jd_match;
pub mod keywords;
pub mod skills;
pub mod summary;
pub mod vocabulary;
