// Domain Reputation
// Scores a URL by its hostname only; page content is never fetched

use tracing::info;
use url::Url;

use crate::models::{AnalysisDetails, AnalysisResult, Verdict};
use crate::services::engine::AnalysisError;
use crate::services::sentiment::NEUTRAL_SENTIMENT;

use super::explanation::domain_explanation;

pub const UNVERIFIED_DOMAIN: &str = "Unverified domain";
pub const RECOGNIZED_DOMAIN: &str = "Recognized news domain";

const TRUSTED_SCORE: f64 = 0.8;
const SUSPICIOUS_SCORE: f64 = 0.2;
const UNKNOWN_SCORE: f64 = 0.5;

const TRUSTED_DOMAINS: &[&str] = &[
    "reuters.com",
    "bbc.com",
    "npr.org",
    "ap.org",
    "cnn.com",
    "nytimes.com",
    "washingtonpost.com",
    "theguardian.com",
    "abc.com",
    "cbsnews.com",
];

const SUSPICIOUS_DOMAINS: &[&str] = &["fake-news.com", "clickbait.com", "conspiracy.com"];

/// Lowercased hostname of an absolute URL. Schemes without a host
/// (`mailto:`, `data:`, `file:///`) yield an empty hostname.
pub fn extract_hostname(url: &str) -> Result<String, AnalysisError> {
    let parsed = Url::parse(url.trim()).map_err(|e| AnalysisError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    Ok(parsed.host_str().unwrap_or("").to_lowercase())
}

/// Trusted entries win over suspicious ones; matching is by substring.
pub fn domain_score(hostname: &str) -> f64 {
    if TRUSTED_DOMAINS.iter().any(|d| hostname.contains(d)) {
        TRUSTED_SCORE
    } else if SUSPICIOUS_DOMAINS.iter().any(|d| hostname.contains(d)) {
        SUSPICIOUS_SCORE
    } else {
        UNKNOWN_SCORE
    }
}

pub fn check_domain(url: &str) -> Result<AnalysisResult, AnalysisError> {
    let hostname = extract_hostname(url)?;
    let score = domain_score(&hostname);
    let verdict = Verdict::from_score(score);
    let is_real = verdict.is_real;

    info!("[DOMAIN] host={} score={}", hostname, score);

    let details = AnalysisDetails {
        sentiment_score: NEUTRAL_SENTIMENT,
        bias_indicators: if is_real {
            vec![]
        } else {
            vec![UNVERIFIED_DOMAIN.to_string()]
        },
        credibility_factors: if is_real {
            vec![RECOGNIZED_DOMAIN.to_string()]
        } else {
            vec![]
        },
        linguistic_patterns: vec![],
    };

    Ok(AnalysisResult::from_verdict(
        verdict,
        domain_explanation(is_real),
        details,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trusted_domain() {
        let result = check_domain("https://www.bbc.com/news/x").unwrap();
        assert!(result.is_real);
        assert_eq!(result.confidence, 60);
        assert_eq!(result.details.credibility_factors, vec![RECOGNIZED_DOMAIN.to_string()]);
        assert!(result.details.bias_indicators.is_empty());
        assert!(result.details.linguistic_patterns.is_empty());
        assert_eq!(result.details.sentiment_score, 0.5);
    }

    #[test]
    fn test_suspicious_domain() {
        let result = check_domain("https://fake-news.com/story").unwrap();
        assert!(!result.is_real);
        assert_eq!(result.confidence, 60);
        assert_eq!(result.details.bias_indicators, vec![UNVERIFIED_DOMAIN.to_string()]);
        assert!(result.details.credibility_factors.is_empty());
    }

    #[test]
    fn test_unknown_domain_is_neutral() {
        let result = check_domain("http://example.org/a?b=c").unwrap();
        assert!(!result.is_real);
        assert_eq!(result.confidence, 0);
        assert_eq!(result.details.bias_indicators, vec![UNVERIFIED_DOMAIN.to_string()]);
    }

    #[test]
    fn test_hostname_is_lowercased() {
        assert_eq!(extract_hostname("HTTPS://WWW.Reuters.COM/world").unwrap(), "www.reuters.com");
        assert_eq!(domain_score("www.reuters.com"), 0.8);
    }

    #[test]
    fn test_invalid_urls() {
        assert!(matches!(
            check_domain("not a url"),
            Err(AnalysisError::InvalidUrl { .. })
        ));
        assert!(matches!(
            check_domain("/relative/path"),
            Err(AnalysisError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_hostless_urls_score_neutral() {
        for url in ["mailto:editor@bbc.com", "file:///tmp/x.html", "data:text/plain,hi"] {
            assert_eq!(extract_hostname(url).unwrap(), "");
            let result = check_domain(url).unwrap();
            assert!(!result.is_real);
            assert_eq!(result.confidence, 0);
            assert_eq!(result.details.bias_indicators, vec![UNVERIFIED_DOMAIN.to_string()]);
        }
    }
}
