//! The response envelope returned by the agent-calling layer.
//!
//! The envelope's shape varies by backend, so [`AgentEnvelope`] reads only
//! the fields every backend agrees on and keeps the untyped source around
//! for [`crate::resolve`]. Reading never fails: wrongly-typed fields are
//! treated as absent.

use serde::Serialize;
use serde_json::Value;

use crate::error::{DashError, Result};
use crate::extract::{self, Extraction};

/// A JSON-bearing field that arrives either as text or already decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Text(String),
    Structured(Value),
}

impl Payload {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => Payload::Text(text),
            other => Payload::Structured(other),
        }
    }

    /// Decode the payload through the lenient extractor.
    pub fn normalize(&self) -> Extraction {
        match self {
            Payload::Text(text) => extract::parse_text(text),
            Payload::Structured(value) => Extraction::Success {
                value: value.clone(),
            },
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Structured(_) => None,
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::from_value(value)
    }
}

/// Typed view over a raw agent envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentEnvelope {
    /// `success`; anything but `true` reads as `false`.
    pub success: bool,
    /// `response.result`.
    pub result: Option<Payload>,
    /// `raw_response`.
    pub raw_response: Option<Payload>,
    /// `error`, when it is a non-empty string.
    pub error: Option<String>,
    source: Value,
}

impl AgentEnvelope {
    pub fn from_value(source: Value) -> Self {
        let success = source
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let result = present(source.pointer("/response/result"))
            .cloned()
            .map(Payload::from_value);
        let raw_response = present(source.get("raw_response"))
            .cloned()
            .map(Payload::from_value);
        let error = source
            .get("error")
            .and_then(Value::as_str)
            .filter(|e| !e.trim().is_empty())
            .map(str::to_string);

        Self {
            success,
            result,
            raw_response,
            error,
            source,
        }
    }

    /// Decode an envelope from text.
    ///
    /// The text goes through the lenient extractor first, so a fenced or
    /// commented envelope is accepted. It must decode to a JSON object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        match extract::parse_text(text) {
            Extraction::Success {
                value: value @ Value::Object(_),
            } => Ok(Self::from_value(value)),
            Extraction::Success { .. } => Err(DashError::InvalidEnvelope(
                "envelope must be a JSON object".to_string(),
            )),
            Extraction::Failure { reason, .. } => Err(DashError::InvalidEnvelope(reason.to_string())),
        }
    }

    /// The untyped envelope as received.
    pub fn source(&self) -> &Value {
        &self.source
    }

    pub fn module_outputs(&self) -> Option<&Value> {
        present(self.source.get("module_outputs"))
    }

    /// Normalize `response.result`. An absent result decodes to `null`.
    pub fn normalized_result(&self) -> Extraction {
        match &self.result {
            Some(payload) => payload.normalize(),
            None => Extraction::Success { value: Value::Null },
        }
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}
