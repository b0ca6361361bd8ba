use regex::Regex;
use serde_json::Value;

use crate::services::ai_service::AiServiceError;

/// Extracts the JSON document a model buried in prose or code fences.
pub struct ResponseParser {
    fence: Regex,
}

impl ResponseParser {
    pub fn new() -> Self {
        Self {
            fence: Regex::new(r"```(?:json)?\s*(\{[\s\S]*\})\s*```").unwrap(),
        }
    }

    /// Preference order: a fenced code block containing an object, then the
    /// first top-level `{...}` span taken greedily. Anything else is a
    /// parse failure for the attempt that produced the text.
    pub fn extract_json(&self, text: &str) -> Result<Value, AiServiceError> {
        if let Some(captures) = self.fence.captures(text) {
            if let Ok(value) = serde_json::from_str::<Value>(&captures[1]) {
                return Ok(value);
            }
        }

        if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
            if start < end {
                if let Ok(value) = serde_json::from_str::<Value>(&text[start..=end]) {
                    return Ok(value);
                }
            }
        }

        Err(AiServiceError::Parse(
            "no parseable JSON object in model output".to_string(),
        ))
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_from_tagged_fence() {
        let parser = ResponseParser::new();
        let text = "Here is your plan:\n```json\n{\"destination\":\"Goa\"}\n```";
        let value = parser.extract_json(text).unwrap();
        assert_eq!(value["destination"], "Goa");
    }

    #[test]
    fn test_extracts_from_untagged_fence() {
        let parser = ResponseParser::new();
        let text = "```\n{\"days\": []}\n```\nHope this helps!";
        let value = parser.extract_json(text).unwrap();
        assert!(value["days"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_extracts_bare_object_from_prose() {
        let parser = ResponseParser::new();
        let text = "Sure! {\"destination\": \"Delhi\", \"duration\": \"2 days\"} Enjoy.";
        let value = parser.extract_json(text).unwrap();
        assert_eq!(value["duration"], "2 days");
    }

    #[test]
    fn test_no_json_is_a_parse_failure() {
        let parser = ResponseParser::new();
        let err = parser.extract_json("I could not produce an itinerary.").unwrap_err();
        assert!(matches!(err, AiServiceError::Parse(_)));
    }

    #[test]
    fn test_unbalanced_braces_fail() {
        let parser = ResponseParser::new();
        assert!(parser.extract_json("{\"destination\": ").is_err());
    }
}
