use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref RE: Regex = Regex::new(r"\w+").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","an","and","are","as",
            "be","but","by",
            "for",
            "has","have",
            "i","in","is","it",
            "not",
            "of","on","or",
            "that","the","these","this","those","to",
            "was","were","with",
            "you"
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Lower-cased word sequence with no stop-word removal. Phrase queries are split this way.
pub fn words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    RE.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}

/// Tokenize text into (term, position) for indexing. Stop words are dropped but
/// still occupy a position, so positions index into the unfiltered word sequence.
pub fn tokenize(text: &str) -> Vec<(String, usize)> {
    words(text)
        .into_iter()
        .enumerate()
        .filter(|(_, word)| !is_stopword(word))
        .map(|(pos, word)| (word, pos))
        .collect()
}

/// Filtered term sequence for query clauses, order preserved, duplicates kept.
pub fn tokenize_query(text: &str) -> Vec<String> {
    words(text).into_iter().filter(|w| !is_stopword(w)).collect()
}
