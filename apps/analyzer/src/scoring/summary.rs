//! Naive extractive summary: the first three sentences, capped in length.

pub const MAX_SUMMARY_CHARS: usize = 600;
const SUMMARY_SENTENCES: usize = 3;
const ELLIPSIS: &str = "...";

/// First three sentences of `text`, joined by single spaces.
///
/// Sentences end at `.`, `!` or `?` followed by whitespace. If the result
/// exceeds `max_chars` it is cut back to the last space that leaves room for
/// the trailing ellipsis, so a word is never split (unless a single word is
/// longer than the whole budget).
pub fn simple_summary(text: &str, max_chars: usize) -> String {
    let sentences = split_sentences(text.trim());
    let summary = sentences
        .into_iter()
        .take(SUMMARY_SENTENCES)
        .collect::<Vec<_>>()
        .join(" ");

    if summary.chars().count() <= max_chars {
        return summary;
    }

    let budget = max_chars.saturating_sub(ELLIPSIS.len());
    let cut_at = summary
        .char_indices()
        .nth(budget)
        .map(|(i, _)| i)
        .unwrap_or(summary.len());
    let cut = &summary[..cut_at];
    let kept = match cut.rfind(' ') {
        Some(i) => &cut[..i],
        None => cut,
    };

    format!("{kept}{ELLIPSIS}")
}

fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c.is_whitespace() && matches!(prev, Some('.' | '!' | '?')) {
            sentences.push(&text[start..i]);
            start = text.len();
            while let Some(&(j, d)) = chars.peek() {
                if !d.is_whitespace() {
                    start = j;
                    break;
                }
                chars.next();
            }
            prev = None;
            continue;
        }
        prev = Some(c);
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}
