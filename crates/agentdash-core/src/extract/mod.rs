//! Lenient JSON extraction from agent text.
//!
//! Agents are asked for JSON but frequently wrap it in commentary or code
//! fences, or emit near-JSON with single quotes and trailing commas.
//! [`parse`] recovers a structured value from all of those and never fails:
//! unrecoverable input comes back as [`Extraction::Failure`] carrying the
//! candidate text that was tried.

pub mod repair;
mod scan;

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::obs;

pub use repair::{RepairPass, REPAIR_ORDER};

/// Why an extraction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Every repair pass was exhausted.
    Unparseable,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Unparseable => f.write_str("unparseable"),
        }
    }
}

/// Outcome of a lenient parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Extraction {
    Success {
        value: Value,
    },
    Failure {
        reason: FailureReason,
        /// The text the repair passes were run against.
        candidate: String,
    },
}

impl Extraction {
    pub fn is_success(&self) -> bool {
        matches!(self, Extraction::Success { .. })
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Extraction::Success { value } => Some(value),
            Extraction::Failure { .. } => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Extraction::Success { value } => Some(value),
            Extraction::Failure { .. } => None,
        }
    }
}

/// Parse a value that may already be decoded.
///
/// Strings are treated as agent text; any other JSON value is returned
/// unchanged.
pub fn parse(input: &Value) -> Extraction {
    match input {
        Value::String(text) => parse_text(text),
        other => Extraction::Success {
            value: other.clone(),
        },
    }
}

/// Parse agent text into a JSON value.
pub fn parse_text(text: &str) -> Extraction {
    // Valid JSON wins before any fence scoping: string values may carry
    // markdown code blocks of their own.
    if let Ok(value) = serde_json::from_str::<Value>(text.trim()) {
        return Extraction::Success { value };
    }

    let scoped = match scan::fenced_body(text) {
        Some(body) => body.trim(),
        None => text.trim(),
    };
    if let Ok(value) = serde_json::from_str::<Value>(scoped) {
        return Extraction::Success { value };
    }

    let candidate = scan::locate(scoped).text();
    if let Ok(value) = serde_json::from_str::<Value>(candidate) {
        return Extraction::Success { value };
    }

    match repair::repair(candidate) {
        Some((value, pass)) => {
            obs::emit_extraction_repaired(pass.as_str(), candidate.len());
            Extraction::Success { value }
        }
        None => {
            obs::emit_extraction_failed(candidate.len());
            Extraction::Failure {
                reason: FailureReason::Unparseable,
                candidate: candidate.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn structured_input_passes_through() {
        let input = json!({"title": "Hi", "n": [1, 2]});
        assert_eq!(
            parse(&input),
            Extraction::Success {
                value: input.clone()
            }
        );
    }

    #[test]
    fn string_input_is_parsed() {
        let input = json!("{\"a\": 1}");
        assert_eq!(parse(&input).into_value(), Some(json!({"a": 1})));
    }

    #[test]
    fn scalar_json_text_parses() {
        assert_eq!(parse_text("42").into_value(), Some(json!(42)));
        assert_eq!(parse_text("\"a [b\"").into_value(), Some(json!("a [b")));
    }

    #[test]
    fn fences_inside_string_values_are_kept() {
        let text = "{\"content\": \"Run:\\n```bash\\nls\\n```\"}";
        assert_eq!(
            parse_text(text).into_value(),
            Some(json!({"content": "Run:\n```bash\nls\n```"}))
        );
    }

    #[test]
    fn commentary_is_discarded() {
        let text = "Here is your result:\n{\"title\": \"Post\"}\nLet me know!";
        assert_eq!(parse_text(text).into_value(), Some(json!({"title": "Post"})));
    }

    #[test]
    fn failure_keeps_candidate() {
        let result = parse_text("prefix {\"a\": ");
        assert_eq!(
            result,
            Extraction::Failure {
                reason: FailureReason::Unparseable,
                candidate: "{\"a\":".to_string(),
            }
        );
    }

    #[test]
    fn failure_serializes_with_status_tag() {
        let result = parse_text("nope");
        let v = serde_json::to_value(&result).expect("serialize");
        assert_eq!(
            v,
            json!({"status": "failure", "reason": "unparseable", "candidate": "nope"})
        );
    }

    #[test]
    fn empty_text_fails() {
        assert!(!parse_text("").is_success());
        assert!(!parse_text("   ").is_success());
    }
}
