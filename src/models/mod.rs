// Verifact Data Models
// Values returned to callers of the credibility engine

use serde::{Deserialize, Serialize};

/// Highest confidence ever reported; a verdict is never presented as certain.
pub const MAX_CONFIDENCE: u8 = 99;

// ============ Analysis Result ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub is_real: bool,
    pub confidence: u8,
    pub explanation: String,
    pub details: AnalysisDetails,
}

impl AnalysisResult {
    /// Build a result from a single credibility score in [0,1].
    /// `is_real` and `confidence` are both derived here and nowhere else.
    pub fn from_score(score: f64, explanation: String, details: AnalysisDetails) -> Self {
        Self::from_verdict(Verdict::from_score(score), explanation, details)
    }

    pub fn from_verdict(verdict: Verdict, explanation: String, details: AnalysisDetails) -> Self {
        Self {
            is_real: verdict.is_real,
            confidence: verdict.confidence,
            explanation,
            details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDetails {
    pub sentiment_score: f64,
    #[serde(default)]
    pub bias_indicators: Vec<String>,
    #[serde(default)]
    pub credibility_factors: Vec<String>,
    #[serde(default)]
    pub linguistic_patterns: Vec<String>,
}

// ============ Verdict ============

/// Real/fake decision derived from a credibility score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub is_real: bool,
    pub confidence: u8,
}

impl Verdict {
    pub fn from_score(score: f64) -> Self {
        let distance = (score - 0.5).abs() * 200.0;
        let confidence = distance.min(MAX_CONFIDENCE as f64).round();
        Self {
            is_real: score > 0.5,
            // NaN saturates to 0 in the cast
            confidence: confidence as u8,
        }
    }
}

// ============ Image Upload ============

/// Metadata of an uploaded image. Pixel content is never inspected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_from_score() {
        let v = Verdict::from_score(0.8);
        assert!(v.is_real);
        assert_eq!(v.confidence, 60);

        let v = Verdict::from_score(0.3);
        assert!(!v.is_real);
        assert_eq!(v.confidence, 40);

        let v = Verdict::from_score(0.5);
        assert!(!v.is_real);
        assert_eq!(v.confidence, 0);
    }

    #[test]
    fn test_confidence_is_capped() {
        assert_eq!(Verdict::from_score(1.0).confidence, 99);
        assert_eq!(Verdict::from_score(0.0).confidence, 99);
        assert_eq!(Verdict::from_score(0.998).confidence, 99);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = AnalysisResult::from_score(
            0.8,
            "ok".to_string(),
            AnalysisDetails {
                sentiment_score: 0.5,
                ..Default::default()
            },
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isReal"], true);
        assert_eq!(json["confidence"], 60);
        assert_eq!(json["details"]["sentimentScore"], 0.5);
        assert!(json["details"]["biasIndicators"].is_array());
        assert!(json["details"]["linguisticPatterns"].is_array());
    }

    #[test]
    fn test_image_file_deserializes_mime_type() {
        let file: ImageFile =
            serde_json::from_str(r#"{"name":"a.png","size":1200,"mimeType":"image/png"}"#).unwrap();
        assert_eq!(file.mime_type, "image/png");
        assert_eq!(file.size, 1200);
    }
}
