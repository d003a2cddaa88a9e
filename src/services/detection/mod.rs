// Detection Module
// Credibility signals organized into specialized submodules:
// - linguistic: capitalization, punctuation, clickbait and emotional wording
// - bias: absolutist wording, missing attribution, conspiracy framing
// - credibility: dates, quotes, statistics, hedged wording
// - aggregation: weighted ensemble of all text signals
// - explanation: prose summaries for every verdict
// - domain_reputation: URL scoring from a fixed domain list
// - image_metadata: image scoring from file metadata

pub mod linguistic;
pub mod bias;
pub mod credibility;
pub mod aggregation;
pub mod explanation;
pub mod domain_reputation;
pub mod image_metadata;

pub use linguistic::analyze_linguistic_patterns;
pub use bias::detect_bias_indicators;
pub use credibility::assess_credibility;
pub use aggregation::{combine_scores, CombinedScore};
pub use explanation::{domain_explanation, generate_explanation, image_explanation};
pub use domain_reputation::{check_domain, domain_score, extract_hostname};
pub use image_metadata::check_image;
