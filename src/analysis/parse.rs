//! Best-effort extraction of the answer object from a model reply

use super::AnalysisResult;
use log::warn;

/// Parses a reply into an [`AnalysisResult`]
///
/// Tries the span from the first `{` to the last `}`, then the whole reply,
/// and falls back to [`AnalysisResult::sentinel`].
pub fn parse_analysis_response(response: &str) -> AnalysisResult {
    extract_json_object(response)
        .and_then(|json| serde_json::from_str(json).ok())
        .or_else(|| serde_json::from_str(response).ok())
        .unwrap_or_else(|| {
            warn!("Failed to parse JSON response; using fallback result");
            AnalysisResult::sentinel()
        })
}

/// Span from the first `{` to the last `}`, inclusive
pub fn extract_json_object(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (end > start).then(|| &response[start..=end])
}
