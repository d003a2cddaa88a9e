// Engine Configuration
// Scoring weights and classifier settings; built in code or from environment variables

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "onnx-community/roberta-base-openai-detector";
const HOSTED_INFERENCE_BASE: &str = "https://api-inference.huggingface.co/models";

/// Weights and caps of the ensemble score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringWeights {
    #[serde(default = "default_ml_weight")]
    pub ml_weight: f64,
    #[serde(default = "default_sentiment_weight")]
    pub sentiment_weight: f64,
    #[serde(default = "default_linguistic_budget")]
    pub linguistic_budget: f64,
    #[serde(default = "default_linguistic_penalty")]
    pub linguistic_penalty: f64,
    #[serde(default = "default_bias_budget")]
    pub bias_budget: f64,
    #[serde(default = "default_bias_penalty")]
    pub bias_penalty: f64,
    #[serde(default = "default_credibility_bonus")]
    pub credibility_bonus: f64,
    #[serde(default = "default_credibility_cap")]
    pub credibility_cap: f64,
    /// Sentiment above this reads as "Highly positive".
    #[serde(default = "default_highly_positive")]
    pub highly_positive: f64,
    /// Sentiment below this reads as "Highly negative".
    #[serde(default = "default_highly_negative")]
    pub highly_negative: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            ml_weight: default_ml_weight(),
            sentiment_weight: default_sentiment_weight(),
            linguistic_budget: default_linguistic_budget(),
            linguistic_penalty: default_linguistic_penalty(),
            bias_budget: default_bias_budget(),
            bias_penalty: default_bias_penalty(),
            credibility_bonus: default_credibility_bonus(),
            credibility_cap: default_credibility_cap(),
            highly_positive: default_highly_positive(),
            highly_negative: default_highly_negative(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierConfig {
    #[serde(default = "default_model")]
    pub model: String,
    /// GPU-backed inference endpoint. Without it the accelerated load fails
    /// and the adapter falls back to `cpu_url`.
    pub accelerated_url: Option<String>,
    #[serde(default = "default_cpu_url")]
    pub cpu_url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_true")]
    pub warmup: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            accelerated_url: None,
            cpu_url: default_cpu_url(),
            api_key: None,
            request_timeout_secs: default_request_timeout(),
            warmup: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    #[serde(default)]
    pub weights: ScoringWeights,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// Upper bound on a single classifier call, including first-time model load.
    pub analysis_timeout_secs: Option<u64>,
}

impl EngineConfig {
    /// Defaults overridden by `VERIFACT_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(model) = env_value(&["VERIFACT_CLASSIFIER_MODEL"]) {
            config.classifier.cpu_url = hosted_inference_url(&model);
            config.classifier.model = model;
        }
        if let Some(url) = env_value(&["VERIFACT_CLASSIFIER_URL"]) {
            config.classifier.cpu_url = url;
        }
        config.classifier.accelerated_url = env_value(&["VERIFACT_CLASSIFIER_GPU_URL"]);
        config.classifier.api_key = env_value(&["VERIFACT_HF_TOKEN", "HF_TOKEN"]);
        if let Some(flag) = env_value(&["VERIFACT_CLASSIFIER_WARMUP"]) {
            config.classifier.warmup = !matches!(flag.as_str(), "0" | "false" | "FALSE");
        }
        config.analysis_timeout_secs =
            env_value(&["VERIFACT_ANALYSIS_TIMEOUT_SECS"]).and_then(|v| v.parse().ok());

        config
    }

    pub fn analysis_timeout(&self) -> Option<Duration> {
        self.analysis_timeout_secs.map(Duration::from_secs)
    }
}

/// First non-empty value among the given environment variables.
fn env_value(keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Ok(val) = env::var(key) {
            let v = val.trim();
            if !v.is_empty() {
                return Some(v.to_string());
            }
        }
    }
    None
}

pub fn hosted_inference_url(model: &str) -> String {
    format!("{}/{}", HOSTED_INFERENCE_BASE, model)
}

fn default_ml_weight() -> f64 { 0.4 }
fn default_sentiment_weight() -> f64 { 0.2 }
fn default_linguistic_budget() -> f64 { 0.2 }
fn default_linguistic_penalty() -> f64 { 0.1 }
fn default_bias_budget() -> f64 { 0.1 }
fn default_bias_penalty() -> f64 { 0.05 }
fn default_credibility_bonus() -> f64 { 0.025 }
fn default_credibility_cap() -> f64 { 0.1 }
fn default_highly_positive() -> f64 { 0.7 }
fn default_highly_negative() -> f64 { 0.3 }
fn default_model() -> String { DEFAULT_MODEL.to_string() }
fn default_cpu_url() -> String { hosted_inference_url(DEFAULT_MODEL) }
fn default_request_timeout() -> u64 { 80 }
fn default_true() -> bool { true }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let w = ScoringWeights::default();
        let total = w.ml_weight + w.sentiment_weight + w.linguistic_budget + w.bias_budget + w.credibility_cap;
        assert!(total <= 1.0 + 1e-9);
        assert_eq!(w.linguistic_penalty, 0.1);
        assert_eq!(w.bias_penalty, 0.05);
    }

    #[test]
    fn test_default_classifier_targets_hosted_model() {
        let config = EngineConfig::default();
        assert_eq!(config.classifier.model, DEFAULT_MODEL);
        assert!(config.classifier.cpu_url.ends_with(DEFAULT_MODEL));
        assert!(config.classifier.accelerated_url.is_none());
        assert!(config.analysis_timeout().is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"weights":{"mlWeight":0.5},"analysisTimeoutSecs":30}"#).unwrap();
        assert_eq!(config.weights.ml_weight, 0.5);
        assert_eq!(config.weights.sentiment_weight, 0.2);
        assert_eq!(config.analysis_timeout(), Some(Duration::from_secs(30)));
        assert!(config.classifier.warmup);
    }
}
