// Credibility Engine
// Entry points for text, URL and image analysis

use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::models::{AnalysisDetails, AnalysisResult, ImageFile, Verdict};
use crate::services::classifier::{
    ClassifierAdapter, ClassifierBackend, ClassifierError, ClassifierOutput, ClassifierState,
    HttpClassifierBackend,
};
use crate::services::config::{EngineConfig, ScoringWeights};
use crate::services::detection::{
    analyze_linguistic_patterns, assess_credibility, check_domain, check_image, combine_scores,
    detect_bias_indicators, generate_explanation,
};
use crate::services::sentiment::score_sentiment;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Classifier model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("Invalid URL format: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Analysis failed. Please try again.")]
    AnalysisFailed {
        #[source]
        source: ClassifierError,
    },
}

impl From<ClassifierError> for AnalysisError {
    fn from(err: ClassifierError) -> Self {
        match err {
            ClassifierError::ModelUnavailable(reason) => AnalysisError::ModelUnavailable(reason),
            other => AnalysisError::AnalysisFailed { source: other },
        }
    }
}

/// Rule-based signals computed from the raw text.
struct TextFeatures {
    sentiment_score: f64,
    linguistic_patterns: Vec<String>,
    bias_indicators: Vec<String>,
    credibility_factors: Vec<String>,
}

fn extract_text_features(text: &str) -> TextFeatures {
    TextFeatures {
        sentiment_score: score_sentiment(text),
        linguistic_patterns: analyze_linguistic_patterns(text),
        bias_indicators: detect_bias_indicators(text),
        credibility_factors: assess_credibility(text),
    }
}

/// Process-wide analysis service. Construct once and share by reference or
/// `Arc`; the classifier it owns is loaded at most once.
pub struct CredibilityEngine {
    classifier: ClassifierAdapter,
    weights: ScoringWeights,
    analysis_timeout: Option<Duration>,
}

impl CredibilityEngine {
    /// Engine backed by the HTTP inference endpoint described in `config`.
    pub fn new(config: EngineConfig) -> Self {
        let backend = Arc::new(HttpClassifierBackend::new(config.classifier.clone()));
        Self::with_backend(backend, config)
    }

    pub fn with_backend(backend: Arc<dyn ClassifierBackend>, config: EngineConfig) -> Self {
        Self {
            classifier: ClassifierAdapter::new(backend),
            analysis_timeout: config.analysis_timeout(),
            weights: config.weights,
        }
    }

    pub fn classifier_state(&self) -> ClassifierState {
        self.classifier.state()
    }

    /// Load the classifier ahead of the first request.
    pub async fn initialize(&self) -> Result<(), AnalysisError> {
        self.classifier.initialize().await.map_err(AnalysisError::from)
    }

    pub async fn analyze_text(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        let span = info_span!("analyze_text", request_id = %Uuid::new_v4());
        self.analyze_text_inner(text).instrument(span).await
    }

    async fn analyze_text_inner(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        let started = Instant::now();
        info!("[ENGINE] Analyzing text: {} chars", text.chars().count());

        let (classification, features) =
            tokio::join!(self.classify(text), async { extract_text_features(text) });
        let classification = classification.map_err(|e| {
            error!("[ENGINE] Text analysis failed: {}", e);
            e
        })?;

        let combined = combine_scores(
            classification.raw_score,
            features.sentiment_score,
            &features.linguistic_patterns,
            &features.bias_indicators,
            &features.credibility_factors,
            &self.weights,
        );
        let verdict = Verdict::from_score(combined.score);
        let explanation = generate_explanation(&combined, verdict.is_real);

        info!(
            "[ENGINE] Text verdict: real={} confidence={} score={:.3} elapsed_ms={}",
            verdict.is_real,
            verdict.confidence,
            combined.score,
            started.elapsed().as_millis()
        );

        Ok(AnalysisResult::from_verdict(
            verdict,
            explanation,
            AnalysisDetails {
                sentiment_score: features.sentiment_score,
                bias_indicators: features.bias_indicators,
                credibility_factors: features.credibility_factors,
                linguistic_patterns: features.linguistic_patterns,
            },
        ))
    }

    async fn classify(&self, text: &str) -> Result<ClassifierOutput, AnalysisError> {
        let fut = self.classifier.classify(text);
        let result = match self.analysis_timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .unwrap_or(Err(ClassifierError::Timeout(limit))),
            None => fut.await,
        };
        result.map_err(AnalysisError::from)
    }

    /// Judge a URL by its domain alone.
    pub fn analyze_url(&self, url: &str) -> Result<AnalysisResult, AnalysisError> {
        let _span = info_span!("analyze_url", request_id = %Uuid::new_v4()).entered();
        check_domain(url)
    }

    /// Judge an image upload by its metadata alone.
    pub fn analyze_image(&self, file: &ImageFile) -> AnalysisResult {
        let _span = info_span!("analyze_image", request_id = %Uuid::new_v4()).entered();
        check_image(file)
    }
}
