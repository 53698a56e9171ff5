//! Text tokenization shared by vocabulary indexing and query parsing
//!
//! Both sides of the BM25 match must agree on token boundaries, so this is
//! the only tokenizer in the crate.

/// Split text into lower-cased word tokens
///
/// A token is a maximal run of alphanumeric characters or underscores; all
/// other characters are separators. Matches the tokenization the keyword
/// vocabulary was extracted with.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in lowered.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            current.push(ch);
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_punctuation_and_lowercases() {
        let tokens = tokenize("Graph-based Retrieval, Explained!");
        assert_eq!(tokens, vec!["graph", "based", "retrieval", "explained"]);
    }

    #[test]
    fn test_keeps_digits_and_underscores() {
        let tokens = tokenize("bm25_score v2 rev_3");
        assert_eq!(tokens, vec!["bm25_score", "v2", "rev_3"]);
    }

    #[test]
    fn test_empty_and_separator_only_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ,;--  ").is_empty());
    }

    #[test]
    fn test_unicode_words_survive() {
        let tokens = tokenize("búsqueda de conocimiento");
        assert_eq!(tokens, vec!["búsqueda", "de", "conocimiento"]);
    }
}
