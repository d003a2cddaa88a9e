// Image Metadata Check
// Two-valued verdict from file size, name and declared type

use tracing::info;

use crate::models::{AnalysisDetails, AnalysisResult, ImageFile, Verdict};
use crate::services::sentiment::NEUTRAL_SENTIMENT;

use super::explanation::image_explanation;

pub const LOW_QUALITY: &str = "Very low image quality";
pub const EDITED_FILENAME: &str = "Filename suggests edited content";
pub const VALID_FORMAT: &str = "Valid image format";

const MIN_IMAGE_BYTES: u64 = 50_000;
const SUSPICIOUS_NAME_PARTS: &[&str] = &["meme", "fake"];

const SUSPICIOUS_SCORE: f64 = 0.3;
const PLAUSIBLE_SCORE: f64 = 0.7;

pub fn check_image(file: &ImageFile) -> AnalysisResult {
    let name = file.name.to_lowercase();
    let mut suspicious = Vec::new();
    let mut credibility = Vec::new();

    if file.size < MIN_IMAGE_BYTES {
        suspicious.push(LOW_QUALITY.to_string());
    }

    if SUSPICIOUS_NAME_PARTS.iter().any(|p| name.contains(p)) {
        suspicious.push(EDITED_FILENAME.to_string());
    }

    if file.mime_type.starts_with("image/") {
        credibility.push(VALID_FORMAT.to_string());
    }

    let score = if suspicious.len() > credibility.len() {
        SUSPICIOUS_SCORE
    } else {
        PLAUSIBLE_SCORE
    };

    info!(
        "[IMAGE] name={} size={} suspicious={} credible={}",
        file.name,
        file.size,
        suspicious.len(),
        credibility.len()
    );

    let verdict = Verdict::from_score(score);
    AnalysisResult::from_verdict(
        verdict,
        image_explanation(verdict.is_real),
        AnalysisDetails {
            sentiment_score: NEUTRAL_SENTIMENT,
            bias_indicators: suspicious,
            credibility_factors: credibility,
            linguistic_patterns: vec![],
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_fake_named_image() {
        let result = check_image(&ImageFile::new("totally_not_fake.jpg", 10_000, "image/jpeg"));
        assert!(!result.is_real);
        assert_eq!(result.confidence, 40);
        assert_eq!(
            result.details.bias_indicators,
            vec![LOW_QUALITY.to_string(), EDITED_FILENAME.to_string()]
        );
        assert_eq!(result.details.credibility_factors, vec![VALID_FORMAT.to_string()]);
        assert!(result.details.linguistic_patterns.is_empty());
    }

    #[test]
    fn test_regular_photo() {
        let result = check_image(&ImageFile::new("IMG_2041.png", 2_400_000, "image/png"));
        assert!(result.is_real);
        assert_eq!(result.confidence, 40);
        assert!(result.details.bias_indicators.is_empty());
    }

    #[test]
    fn test_tie_counts_as_plausible() {
        // one suspicious factor, one credibility factor
        let result = check_image(&ImageFile::new("Funny-MEME.gif", 900_000, "image/gif"));
        assert!(result.is_real);
        assert_eq!(result.details.bias_indicators, vec![EDITED_FILENAME.to_string()]);
    }

    #[test]
    fn test_non_image_type() {
        let result = check_image(&ImageFile::new("scan.pdf", 900_000, "application/pdf"));
        // zero vs zero
        assert!(result.is_real);
        assert!(result.details.credibility_factors.is_empty());
    }
}
