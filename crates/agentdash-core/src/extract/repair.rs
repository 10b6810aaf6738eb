//! Repair passes for almost-JSON.
//!
//! Passes run in a fixed order and are cumulative: each one rewrites the
//! output of the previous pass, and a strict parse is attempted after every
//! step.

use serde::Serialize;
use serde_json::Value;

use super::scan::QuoteTracker;

/// One textual rewrite applied to a failed candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairPass {
    /// `'key': 'value'` becomes `"key": "value"`.
    SingleQuotes,
    /// `[1, 2,]` becomes `[1, 2]`.
    TrailingCommas,
    /// Raw newlines and tabs inside string literals become escapes.
    ControlCharacters,
}

/// Order in which repairs are tried.
pub const REPAIR_ORDER: [RepairPass; 3] = [
    RepairPass::SingleQuotes,
    RepairPass::TrailingCommas,
    RepairPass::ControlCharacters,
];

impl RepairPass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepairPass::SingleQuotes => "single_quotes",
            RepairPass::TrailingCommas => "trailing_commas",
            RepairPass::ControlCharacters => "control_characters",
        }
    }

    pub fn apply(&self, text: &str) -> String {
        match self {
            RepairPass::SingleQuotes => normalize_single_quotes(text),
            RepairPass::TrailingCommas => strip_trailing_commas(text),
            RepairPass::ControlCharacters => escape_control_characters(text),
        }
    }
}

/// Run the passes in order and return the first value that parses, along
/// with the pass that made it parse.
pub(crate) fn repair(candidate: &str) -> Option<(Value, RepairPass)> {
    let mut working = candidate.to_string();
    for pass in REPAIR_ORDER {
        working = pass.apply(&working);
        if let Ok(value) = serde_json::from_str::<Value>(&working) {
            return Some((value, pass));
        }
    }
    None
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Literal {
    Outside,
    Double,
    Single,
}

fn normalize_single_quotes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut literal = Literal::Outside;
    let mut escaped = false;

    for c in text.chars() {
        match literal {
            Literal::Outside => {
                match c {
                    '\'' => {
                        literal = Literal::Single;
                        out.push('"');
                        continue;
                    }
                    '"' => literal = Literal::Double,
                    _ => {}
                }
                out.push(c);
            }
            Literal::Double => {
                out.push(c);
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    literal = Literal::Outside;
                }
            }
            Literal::Single => {
                if escaped {
                    escaped = false;
                    // `\'` has no meaning in JSON; keep every other escape as-is.
                    if c != '\'' {
                        out.push('\\');
                    }
                    out.push(c);
                } else if c == '\\' {
                    escaped = true;
                } else if c == '\'' {
                    literal = Literal::Outside;
                    out.push('"');
                } else if c == '"' {
                    out.push_str("\\\"");
                } else {
                    out.push(c);
                }
            }
        }
    }

    if escaped && literal == Literal::Single {
        out.push('\\');
    }
    out
}

fn strip_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut quotes = QuoteTracker::default();

    for (i, &c) in chars.iter().enumerate() {
        if quotes.step(c) {
            out.push(c);
            continue;
        }
        if c == ',' {
            let next = chars[i + 1..].iter().find(|n| !n.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }
        out.push(c);
    }
    out
}

fn escape_control_characters(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quotes = QuoteTracker::default();

    for c in text.chars() {
        let was_inside = quotes.in_string();
        quotes.step(c);
        if was_inside && (c as u32) < 0x20 {
            match c {
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                other => out.push_str(&format!("\\u{:04x}", other as u32)),
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_quotes_become_double_quotes() {
        assert_eq!(
            normalize_single_quotes("{'title': 'Hello'}"),
            r#"{"title": "Hello"}"#
        );
    }

    #[test]
    fn single_quotes_escape_embedded_double_quotes() {
        assert_eq!(
            normalize_single_quotes(r#"{'q': 'say "hi"'}"#),
            r#"{"q": "say \"hi\""}"#
        );
    }

    #[test]
    fn single_quotes_keep_apostrophes_inside_double_strings() {
        let text = r#"{"tip": "don't stop"}"#;
        assert_eq!(normalize_single_quotes(text), text);
    }

    #[test]
    fn escaped_apostrophe_in_single_string() {
        assert_eq!(
            normalize_single_quotes(r"{'tip': 'don\'t'}"),
            r#"{"tip": "don't"}"#
        );
    }

    #[test]
    fn trailing_commas_removed_before_closers() {
        assert_eq!(
            strip_trailing_commas("{\"a\": [1, 2, ], \"b\": 3,\n}"),
            "{\"a\": [1, 2 ], \"b\": 3\n}"
        );
    }

    #[test]
    fn trailing_commas_inside_strings_survive() {
        let text = r#"{"a": "x,}"}"#;
        assert_eq!(strip_trailing_commas(text), text);
    }

    #[test]
    fn control_characters_escaped_only_inside_strings() {
        let text = "{\n\"a\": \"line1\nline2\tend\"\n}";
        assert_eq!(
            escape_control_characters(text),
            "{\n\"a\": \"line1\\nline2\\tend\"\n}"
        );
    }

    #[test]
    fn repair_reports_first_successful_pass() {
        let (value, pass) = repair("{'a': 1}").expect("repairable");
        assert_eq!(value, json!({"a": 1}));
        assert_eq!(pass, RepairPass::SingleQuotes);

        let (value, pass) = repair("{\"a\": 1,}").expect("repairable");
        assert_eq!(value, json!({"a": 1}));
        assert_eq!(pass, RepairPass::TrailingCommas);
    }

    #[test]
    fn repairs_accumulate() {
        let (value, pass) = repair("{'a': 'x\ny',}").expect("repairable");
        assert_eq!(value, json!({"a": "x\ny"}));
        assert_eq!(pass, RepairPass::ControlCharacters);
    }

    #[test]
    fn hopeless_text_is_not_repaired() {
        assert!(repair("not json at all").is_none());
    }
}
