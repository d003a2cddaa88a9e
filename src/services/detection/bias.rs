// Bias Indicator Detection
// Absolutist wording, missing attribution and conspiracy framing

use regex::Regex;
use std::sync::OnceLock;

use crate::services::text_processor::{count_phrases_present, text_length};

pub const ABSOLUTE_STATEMENTS: &str = "Excessive absolute statements";
pub const NO_SOURCES: &str = "No credible sources cited";
pub const CONSPIRACY_LANGUAGE: &str = "Conspiracy theory language";

const ABSOLUTE_WORD_LIMIT: usize = 2;
/// Texts at or below this length are not expected to cite anything.
const SOURCELESS_MIN_LENGTH: usize = 200;

const ABSOLUTE_WORDS: &[&str] = &["always", "never", "all", "none", "every", "completely"];

const CONSPIRACY_WORDS: &[&str] = &[
    "cover-up",
    "conspiracy",
    "they don't want you to know",
    "hidden truth",
    "suppressed",
    "mainstream media",
];

fn attribution_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)according to|study shows|research indicates|experts say|data reveals")
            .expect("attribution regex")
    })
}

fn has_source_reference(text: &str) -> bool {
    attribution_re().is_match(text)
}

pub fn detect_bias_indicators(text: &str) -> Vec<String> {
    let mut indicators = Vec::new();

    if count_phrases_present(text, ABSOLUTE_WORDS) > ABSOLUTE_WORD_LIMIT {
        indicators.push(ABSOLUTE_STATEMENTS.to_string());
    }

    if text_length(text) > SOURCELESS_MIN_LENGTH && !has_source_reference(text) {
        indicators.push(NO_SOURCES.to_string());
    }

    if count_phrases_present(text, CONSPIRACY_WORDS) > 0 {
        indicators.push(CONSPIRACY_LANGUAGE.to_string());
    }

    indicators
}
