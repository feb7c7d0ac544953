//! Parsing of model output into cases and replies.
//!
//! Models often wrap JSON in a fenced code block or add a sentence around
//! it, so the JSON object is located before it is deserialized.

use noire_application::ports::case_provider::{CharacterReply, ProviderError};
use noire_domain::CaseFile;
use serde_json::Value;

/// Locate the JSON object in a model response.
///
/// Checks, in order: a ```` ```json ```` (or bare ```` ``` ````) fenced
/// block, then the outermost `{ ... }` span, then the trimmed text itself.
pub fn extract_json(text: &str) -> &str {
    if let Some(block) = fenced_block(text) {
        return block;
    }

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text.trim(),
    }
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_fence = &text[start + 3..];
    // Skip the language tag on the opening line
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    let block = body[..end].trim();
    (!block.is_empty()).then_some(block)
}

/// Parse a generated case.
///
/// Numeric suspect ids are accepted and converted to strings; anything else
/// that does not match the case shape is [`ProviderError::MalformedCase`].
pub fn parse_case(text: &str) -> Result<CaseFile, ProviderError> {
    let mut value: Value = serde_json::from_str(extract_json(text))
        .map_err(|e| ProviderError::MalformedCase(e.to_string()))?;

    if let Some(characters) = value.get_mut("characters").and_then(Value::as_array_mut) {
        for character in characters {
            if let Some(Value::Number(n)) = character.get("id") {
                let id = n.to_string();
                character["id"] = Value::String(id);
            }
        }
    }

    serde_json::from_value(value).map_err(|e| ProviderError::MalformedCase(e.to_string()))
}

/// Parse a suspect's reply.
///
/// The reply must be a JSON object with a non-empty `response`; `isLie`
/// defaults to false when absent.
pub fn parse_reply(text: &str) -> Result<CharacterReply, ProviderError> {
    let reply: CharacterReply = serde_json::from_str(extract_json(text))
        .map_err(|e| ProviderError::MalformedReply(e.to_string()))?;

    if reply.response.trim().is_empty() {
        return Err(ProviderError::MalformedReply(
            "reply has an empty response".to_string(),
        ));
    }

    Ok(reply)
}
