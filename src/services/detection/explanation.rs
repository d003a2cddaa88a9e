// Explanation Generation
// Prose summaries for text, domain and image verdicts

use super::aggregation::CombinedScore;

const LEGITIMATE_LEAD: &str = "This content appears to be legitimate based on our analysis. ";
const MISLEADING_LEAD: &str =
    "This content shows characteristics of potentially misleading information. ";
const METHOD_NOTE: &str = "Our AI model combines multiple detection techniques including linguistic pattern analysis, sentiment evaluation, and bias detection to provide this assessment.";

pub fn generate_explanation(combined: &CombinedScore, is_real: bool) -> String {
    let lead = if is_real { LEGITIMATE_LEAD } else { MISLEADING_LEAD };
    format!(
        "{}Analysis factors: {}. {}",
        lead,
        combined.reasoning.join(", "),
        METHOD_NOTE
    )
}

pub fn domain_explanation(is_real: bool) -> String {
    if is_real {
        "Domain analysis indicates a credible source. This domain is recognized as a legitimate news source."
            .to_string()
    } else {
        "Domain analysis indicates a potentially unreliable source. This domain may not be a verified news source."
            .to_string()
    }
}

pub fn image_explanation(is_real: bool) -> String {
    if is_real {
        "Image analysis completed. No obvious signs of manipulation detected.".to_string()
    } else {
        "Image analysis completed. Potential signs of manipulation or unreliable source detected."
            .to_string()
    }
}
