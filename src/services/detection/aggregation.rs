// Aggregation Logic
// Combines the classifier score, sentiment and lexical findings into one credibility score

use crate::services::config::ScoringWeights;

/// Ensemble output: the credibility score plus the audit trail shown to users.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedScore {
    pub score: f64,
    pub reasoning: Vec<String>,
}

/// Weighted ensemble of all text signals.
///
/// Each lexical term is a fixed budget minus a capped per-finding penalty, so
/// it never goes negative; credibility findings add a capped bonus instead.
/// The sum is clamped to [0,1], which absorbs any combination exceeding 1.
pub fn combine_scores(
    ml_score: f64,
    sentiment_score: f64,
    linguistic_patterns: &[String],
    bias_indicators: &[String],
    credibility_factors: &[String],
    weights: &ScoringWeights,
) -> CombinedScore {
    let mut score = ml_score * weights.ml_weight;

    // 0 when neutral, 1 when maximally extreme
    let sentiment_bias = (sentiment_score - 0.5).abs() * 2.0;
    score += (1.0 - sentiment_bias) * weights.sentiment_weight;

    let linguistic_penalty = (linguistic_patterns.len() as f64 * weights.linguistic_penalty)
        .min(weights.linguistic_budget);
    score += weights.linguistic_budget - linguistic_penalty;

    let bias_penalty =
        (bias_indicators.len() as f64 * weights.bias_penalty).min(weights.bias_budget);
    score += weights.bias_budget - bias_penalty;

    let credibility_bonus = (credibility_factors.len() as f64 * weights.credibility_bonus)
        .min(weights.credibility_cap);
    score += credibility_bonus;

    let reasoning = vec![
        format!("ML model confidence: {:.1}%", ml_score * 100.0),
        format!(
            "Sentiment analysis: {}",
            sentiment_label(sentiment_score, weights)
        ),
        format!("Linguistic issues: {}", linguistic_patterns.len()),
        format!("Bias indicators: {}", bias_indicators.len()),
        format!("Credibility factors: {}", credibility_factors.len()),
    ];

    CombinedScore {
        score: score.clamp(0.0, 1.0),
        reasoning,
    }
}

fn sentiment_label(sentiment_score: f64, weights: &ScoringWeights) -> &'static str {
    if sentiment_score > weights.highly_positive {
        "Highly positive"
    } else if sentiment_score < weights.highly_negative {
        "Highly negative"
    } else {
        "Balanced"
    }
}
