// Sentiment Scoring
// Lexicon-based polarity (AFINN word list, -5..+5 per word) normalized to [0,1]

use std::collections::HashMap;
use std::sync::OnceLock;

use super::stemmer::stem;
use super::text_processor::tokenize_words;

/// Score returned for empty or neutral text.
pub const NEUTRAL_SENTIMENT: f64 = 0.5;

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "none", "nobody", "nothing", "nowhere", "cannot", "t",
];

/// AFINN-165: one `word<TAB>score` entry per line.
const AFINN_165: &str = include_str!("data/afinn-165.txt");

fn parse_lexicon(data: &'static str) -> impl Iterator<Item = (&'static str, i32)> {
    data.lines().filter_map(|line| {
        let (word, score) = line.rsplit_once('\t')?;
        Some((word.trim(), score.trim().parse().ok()?))
    })
}

struct Lexicon {
    words: HashMap<&'static str, i32>,
    stems: HashMap<String, i32>,
}

impl Lexicon {
    fn get(&self, token: &str) -> Option<i32> {
        self.words
            .get(token)
            .copied()
            .or_else(|| self.stems.get(&stem(token)).copied())
    }
}

fn lexicon() -> &'static Lexicon {
    static LEXICON: OnceLock<Lexicon> = OnceLock::new();
    LEXICON.get_or_init(|| Lexicon {
        words: parse_lexicon(AFINN_165).collect(),
        stems: parse_lexicon(AFINN_165).map(|(w, v)| (stem(w), v)).collect(),
    })
}

/// Average polarity per token, in the lexicon's -5..+5 range.
/// After a negation word, every later lexicon hit counts with flipped sign.
pub fn raw_polarity(text: &str) -> f64 {
    let tokens = tokenize_words(&text.to_lowercase());
    if tokens.is_empty() {
        return 0.0;
    }

    let lexicon = lexicon();
    let mut total = 0i32;
    let mut negate = false;
    for token in &tokens {
        if NEGATIONS.contains(&token.as_str()) {
            negate = true;
            continue;
        }
        if let Some(value) = lexicon.get(token) {
            total += if negate { -value } else { value };
        }
    }

    total as f64 / tokens.len() as f64
}

/// Sentiment score in [0,1]: 0 strongly negative, 0.5 neutral, 1 strongly positive.
pub fn score_sentiment(text: &str) -> f64 {
    ((raw_polarity(text) + 5.0) / 10.0).clamp(0.0, 1.0)
}
