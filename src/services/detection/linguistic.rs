// Linguistic Pattern Detection
// Flags capitalization, punctuation, clickbait and emotionally loaded wording

use regex::Regex;
use std::sync::OnceLock;

use crate::services::text_processor::{count_phrases_present, count_uppercase, text_length};

pub const EXCESSIVE_CAPS: &str = "Excessive capitalization detected";
pub const EXCESSIVE_EXCLAMATION: &str = "Excessive exclamation marks";
pub const CLICKBAIT: &str = "Clickbait language detected";
pub const EMOTIONAL_MANIPULATION: &str = "High emotional manipulation language";

const CAPS_RATIO_LIMIT: f64 = 0.1;
const EXCLAMATION_LIMIT: usize = 3;
const EMOTIONAL_WORD_MIN: usize = 3;

const EMOTIONAL_WORDS: &[&str] = &[
    "outrageous",
    "shocking",
    "incredible",
    "unbelievable",
    "devastating",
    "explosive",
    "breaking",
];

fn clickbait_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"(?i)you won['’]t believe",
            r"(?i)this will shock you",
            r"(?i)doctors hate",
            r"(?i)one weird trick",
            r"(?i)\d+ reasons why",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("clickbait regex"))
        .collect()
    })
}

/// Share of uppercase letters over all characters.
fn caps_ratio(text: &str) -> f64 {
    let len = text_length(text);
    if len == 0 {
        return 0.0;
    }
    count_uppercase(text) as f64 / len as f64
}

/// Scan text for stylistic red flags. One clickbait finding is emitted per
/// matching pattern, so the same message may appear more than once.
pub fn analyze_linguistic_patterns(text: &str) -> Vec<String> {
    let mut patterns = Vec::new();

    if caps_ratio(text) > CAPS_RATIO_LIMIT {
        patterns.push(EXCESSIVE_CAPS.to_string());
    }

    let exclamations = text.chars().filter(|c| *c == '!').count();
    if exclamations > EXCLAMATION_LIMIT {
        patterns.push(EXCESSIVE_EXCLAMATION.to_string());
    }

    for re in clickbait_patterns() {
        if re.is_match(text) {
            patterns.push(CLICKBAIT.to_string());
        }
    }

    if count_phrases_present(text, EMOTIONAL_WORDS) >= EMOTIONAL_WORD_MIN {
        patterns.push(EMOTIONAL_MANIPULATION.to_string());
    }

    patterns
}
