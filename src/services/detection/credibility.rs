// Credibility Factor Detection
// Positive signals: concrete dates, direct quotes, statistics, hedged wording

use regex::Regex;
use std::sync::OnceLock;

use crate::services::text_processor::count_phrases_present;

pub const SPECIFIC_DATES: &str = "Specific dates mentioned";
pub const DIRECT_QUOTES: &str = "Direct quotes included";
pub const STATISTICAL_DATA: &str = "Statistical data provided";
pub const BALANCED_LANGUAGE: &str = "Balanced perspective language";

const BALANCED_WORDS: &[&str] = &[
    "however",
    "although",
    "while",
    "on the other hand",
    "nevertheless",
];

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(19|20)\d{2}\b|\b(January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},?\s+(19|20)\d{2}\b",
        )
        .expect("date regex")
    })
}

fn quote_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""[^"]{10,}""#).expect("quote regex"))
}

fn stats_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b\d+(\.\d+)?%|\b\d+\s+(percent|people|participants|respondents)\b")
            .expect("stats regex")
    })
}

pub fn assess_credibility(text: &str) -> Vec<String> {
    let mut factors = Vec::new();

    if date_re().is_match(text) {
        factors.push(SPECIFIC_DATES.to_string());
    }

    if quote_re().is_match(text) {
        factors.push(DIRECT_QUOTES.to_string());
    }

    if stats_re().is_match(text) {
        factors.push(STATISTICAL_DATA.to_string());
    }

    if count_phrases_present(text, BALANCED_WORDS) > 0 {
        factors.push(BALANCED_LANGUAGE.to_string());
    }

    factors
}
