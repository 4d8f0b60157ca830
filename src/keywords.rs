use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Question words and filler that never narrow a textbook search.
const STOPWORDS: &[&str] = &[
    "the", "is", "are", "was", "were", "what", "which", "who", "whom", "a", "an", "of", "to", "in",
    "on", "for", "with", "and", "or", "does", "do", "did", "how", "why", "when", "explain",
    "define", "tell", "about", "write", "should", "think", "where", "above", "here", "mean",
    "meaning", "know", "known", "can", "cannot", "could", "couldn't",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z]{3,}").expect("valid regex"));

/// Pulls search terms out of a question.
///
/// Terms are maximal runs of at least three ASCII letters from the lowercased
/// question, minus stopwords. Duplicates are kept. The result is stable-sorted
/// longest first so the most specific terms lead.
pub fn extract_keywords(question: &str) -> Vec<String> {
    let lower = question.to_lowercase();

    let mut keywords: Vec<String> = TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|token| !STOPWORD_SET.contains(token))
        .map(str::to_string)
        .collect();

    keywords.sort_by(|a, b| b.len().cmp(&a.len()));
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopword_only_question_has_no_keywords() {
        assert!(extract_keywords("What is the, and how? Why! When?").is_empty());
        assert!(extract_keywords("Explain. Define. Tell me about it").is_empty());
    }

    #[test]
    fn empty_question_has_no_keywords() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("   \n\t").is_empty());
    }

    #[test]
    fn short_words_never_become_keywords() {
        assert!(extract_keywords("a A is IS to To a is to go me").is_empty());
        assert!(extract_keywords("AA bb Cc").is_empty());
    }

    #[test]
    fn keywords_are_lowercased_and_longest_first() {
        let keywords = extract_keywords("At what temperature does Water boil?");
        assert_eq!(keywords, vec!["temperature", "water", "boil"]);
    }

    #[test]
    fn equal_length_keywords_keep_question_order() {
        let keywords = extract_keywords("cell wall bone skin photosynthesis");
        assert_eq!(
            keywords,
            vec!["photosynthesis", "cell", "wall", "bone", "skin"]
        );

        for pair in keywords.windows(2) {
            assert!(pair[0].len() >= pair[1].len());
        }
    }

    #[test]
    fn duplicates_are_kept() {
        let keywords = extract_keywords("atom atom ATOM");
        assert_eq!(keywords, vec!["atom", "atom", "atom"]);
    }

    #[test]
    fn digits_and_punctuation_split_tokens() {
        let keywords = extract_keywords("h2o co2-emission ab1cde");
        assert_eq!(keywords, vec!["emission", "cde"]);
    }

    #[test]
    fn non_ascii_letters_break_runs() {
        let keywords = extract_keywords("café naïve");
        assert_eq!(keywords, vec!["caf"]);
    }

    #[test]
    fn apostrophes_split_contractions() {
        // "couldn't" is a stopword, but the scan only ever sees "couldn".
        let keywords = extract_keywords("couldn't");
        assert_eq!(keywords, vec!["couldn"]);
    }

    #[test]
    fn stopwords_match_in_any_case() {
        assert!(extract_keywords("WHAT Explain ABOUT Meaning").is_empty());
        assert_eq!(extract_keywords("EXPLAIN Water"), vec!["water"]);
    }

    #[test]
    fn stopword_list_has_no_duplicates() {
        assert_eq!(STOPWORD_SET.len(), STOPWORDS.len());
    }
}
