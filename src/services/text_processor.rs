// Text Processing Service
// Tokenization and phrase-matching helpers shared by the detectors

use regex::Regex;
use std::sync::OnceLock;

fn word_separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z\u{0410}-\u{044F}0-9_]+").expect("word separator regex"))
}

/// Split text into word tokens.
/// Any run of characters outside letters, digits and underscore separates words,
/// so "won't" yields ["won", "t"].
pub fn tokenize_words(text: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }

    word_separator_re()
        .split(text)
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Count how many distinct entries of `phrases` occur in `text`, ignoring case.
/// Matching is by substring, so "all" also hits "totally".
pub fn count_phrases_present(text: &str, phrases: &[&str]) -> usize {
    let lower = text.to_lowercase();
    phrases.iter().filter(|p| lower.contains(*p)).count()
}

/// Count uppercase ASCII letters.
pub fn count_uppercase(text: &str) -> usize {
    text.chars().filter(|c| c.is_ascii_uppercase()).count()
}

/// Text length in UTF-16 code units, the unit used by the length thresholds.
pub fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_words() {
        assert_eq!(
            tokenize_words("Hello, world! It's 2024."),
            vec!["Hello", "world", "It", "s", "2024"]
        );
        assert!(tokenize_words("").is_empty());
        assert!(tokenize_words("  ...!!  ").is_empty());
    }

    #[test]
    fn test_count_phrases_present() {
        let words = ["always", "never", "all"];
        assert_eq!(count_phrases_present("ALWAYS and Never", &words), 2);
        // substring semantics
        assert_eq!(count_phrases_present("totally", &words), 1);
        assert_eq!(count_phrases_present("nothing here", &words), 0);
    }

    #[test]
    fn test_text_length_counts_utf16_units() {
        assert_eq!(text_length("abc"), 3);
        assert_eq!(text_length("é"), 1);
        assert_eq!(text_length("😀"), 2);
    }
}
