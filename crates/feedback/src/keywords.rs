use std::collections::HashMap;
use vox_core::MAX_KEYWORDS;

#[rustfmt::skip]
const STOPWORDS: &[&str] = &[
    "about", "after", "again", "also", "been", "before", "being", "could", "does",
    "doing", "down", "each", "from", "further", "have", "having", "here", "into",
    "just", "more", "most", "much", "only", "other", "over", "same", "should",
    "some", "such", "than", "that", "their", "them", "then", "there", "these",
    "they", "this", "those", "through", "very", "were", "what", "when", "where",
    "which", "while", "will", "with", "would", "your",
];

/// Most frequent content words of the text, ties broken by first appearance.
pub fn keywords(title: &str, description: &str) -> Vec<String> {
    let mut counts = HashMap::<String, (usize, usize)>::new();
    title
        .split(|c: char| !c.is_alphanumeric())
        .chain(description.split(|c: char| !c.is_alphanumeric()))
        .map(str::to_lowercase)
        .filter(|w| w.chars().count() >= 4)
        .filter(|w| !w.chars().all(|c| c.is_ascii_digit()))
        .filter(|w| !STOPWORDS.contains(&w.as_str()))
        .enumerate()
        .for_each(|(position, word)| {
            counts.entry(word).or_insert((0, position)).0 += 1;
        });
    let mut ranked = counts.into_iter().collect::<Vec<_>>();
    ranked.sort_by(|(_, (n1, p1)), (_, (n2, p2))| n2.cmp(n1).then(p1.cmp(p2)));
    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(word, _)| word)
        .collect()
}

/// Lowercased, trimmed, de-duplicated theme tags.
pub fn themes(raw: Vec<String>) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    for theme in raw.into_iter().map(|t| t.trim().to_lowercase()) {
        if !theme.is_empty() && !seen.contains(&theme) {
            seen.push(theme);
        }
    }
    seen
}
