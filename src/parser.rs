//! Turns the vision model's free-text reply into an [`AnalysisResult`].

use crate::{
    error::{Result, RoomGenError},
    models::AnalysisResult,
};

const FENCE: &str = "```";

/// Strips markdown code-fence markup around a model reply.
///
/// Returns the body of the first fenced block (the language tag on the
/// opening line is dropped) or the trimmed input when no fence is present.
/// An unclosed fence runs to the end of the text.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(open) = trimmed.find(FENCE) else {
        return trimmed;
    };

    let after_open = &trimmed[open + FENCE.len()..];
    let body = match after_open.find('\n') {
        Some(newline) => &after_open[newline + 1..],
        // Single-line form: ```{"a":1}```
        None => after_open.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };

    match body.find(FENCE) {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}

pub fn parse_analysis(text: &str) -> Result<AnalysisResult> {
    let cleaned = strip_code_fence(text);
    let analysis: AnalysisResult = serde_json::from_str(cleaned).map_err(|e| {
        log::error!("Failed to parse analysis: {} -- raw reply: {}", e, text);
        RoomGenError::ParseError(e)
    })?;

    log::debug!(
        "Parsed analysis with {} suggestions",
        analysis.suggestions.len()
    );
    Ok(analysis)
}
