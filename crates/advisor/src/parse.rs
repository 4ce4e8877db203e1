//! Cleaning and parsing of generator text.

use serde_json::Value;
use shared::StrategyError;

/// Strip Markdown code fences the model sometimes wraps JSON in
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse generator text into a JSON object
///
/// Anything that is not a JSON object is reported as unavailable.
pub fn parse_generated_json(text: &str) -> Result<Value, StrategyError> {
    let cleaned = strip_code_fences(text);
    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|e| StrategyError::GenerationUnavailable(format!("unparseable response: {}", e)))?;

    if !value.is_object() {
        return Err(StrategyError::GenerationUnavailable(
            "response is not a JSON object".to_string(),
        ));
    }
    Ok(value)
}
