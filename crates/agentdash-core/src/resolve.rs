//! Media URL resolution across envelope shapes.
//!
//! Different image backends put the generated file's URL in different
//! places. Each known place is a [`ShapeHypothesis`]; [`resolve_url`] tries
//! them in [`HYPOTHESES`] order and returns the first non-empty string, or
//! `""` when none matches. A missing or wrongly-typed intermediate value
//! only skips the hypothesis being tried.

use serde::Serialize;
use serde_json::Value;

use crate::extract;
use crate::obs;

/// Fields read from a file descriptor, in preference order.
const DESCRIPTOR_FIELDS: [&str; 2] = ["file_url", "url"];
/// Fields read from a `module_outputs` mapping.
const MODULE_OUTPUT_FIELDS: [&str; 3] = ["file_url", "url", "image_url"];
/// Fields read from the decoded agent result.
const RESULT_FIELDS: [&str; 4] = ["image_url", "file_url", "url", "image"];
/// Top-level fields read from a decoded `raw_response`.
const RAW_TOP_LEVEL_FIELDS: [&str; 3] = ["image_url", "file_url", "url"];
/// Where a decoded `raw_response` may keep its module outputs.
const RAW_MODULE_OUTPUT_POINTERS: [&str; 3] = [
    "/module_outputs",
    "/response/module_outputs",
    "/data/module_outputs",
];

/// One guess about where the media URL lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeHypothesis {
    /// `module_outputs: [{file_url, url}, ...]`
    ModuleOutputsList,
    /// `module_outputs: {artifact_files: [{file_url, url}, ...]}`
    ModuleOutputsArtifactList,
    /// `module_outputs: {file_url | url | image_url}`
    ModuleOutputsMap,
    /// `module_outputs: {artifact_files: {file_url | url}}`
    ModuleOutputsArtifactMap,
    /// The decoded result carries the URL itself.
    ParsedResult,
    /// `raw_response` holds a second envelope, possibly as text.
    RawResponse,
}

/// Evaluation order. First non-empty match wins.
pub const HYPOTHESES: [ShapeHypothesis; 6] = [
    ShapeHypothesis::ModuleOutputsList,
    ShapeHypothesis::ModuleOutputsArtifactList,
    ShapeHypothesis::ModuleOutputsMap,
    ShapeHypothesis::ModuleOutputsArtifactMap,
    ShapeHypothesis::ParsedResult,
    ShapeHypothesis::RawResponse,
];

impl ShapeHypothesis {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeHypothesis::ModuleOutputsList => "module_outputs_list",
            ShapeHypothesis::ModuleOutputsArtifactList => "module_outputs_artifact_list",
            ShapeHypothesis::ModuleOutputsMap => "module_outputs_map",
            ShapeHypothesis::ModuleOutputsArtifactMap => "module_outputs_artifact_map",
            ShapeHypothesis::ParsedResult => "parsed_result",
            ShapeHypothesis::RawResponse => "raw_response",
        }
    }

    /// Try this hypothesis against an envelope and its decoded result.
    pub fn probe(&self, envelope: &Value, parsed_result: &Value) -> Option<String> {
        match self {
            ShapeHypothesis::ModuleOutputsList => first_descriptor(module_outputs(envelope)?),
            ShapeHypothesis::ModuleOutputsArtifactList => {
                first_descriptor(module_outputs(envelope)?.get("artifact_files")?)
            }
            ShapeHypothesis::ModuleOutputsMap => {
                first_field(module_outputs(envelope)?, &MODULE_OUTPUT_FIELDS)
            }
            ShapeHypothesis::ModuleOutputsArtifactMap => {
                let files = module_outputs(envelope)?.get("artifact_files")?;
                first_field(files, &DESCRIPTOR_FIELDS)
            }
            ShapeHypothesis::ParsedResult => first_field(parsed_result, &RESULT_FIELDS),
            ShapeHypothesis::RawResponse => probe_raw_response(present(envelope.get("raw_response"))?),
        }
    }
}

/// A resolved URL together with the hypothesis that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Empty when nothing matched.
    pub url: String,
    pub hypothesis: Option<ShapeHypothesis>,
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        self.hypothesis.is_some()
    }
}

/// Locate the media URL in `envelope`, falling back to `parsed_result`.
///
/// Returns `""` when no hypothesis matches.
pub fn resolve_url(envelope: &Value, parsed_result: &Value) -> String {
    resolve_url_traced(envelope, parsed_result).url
}

/// Like [`resolve_url`], but also reports which hypothesis matched.
pub fn resolve_url_traced(envelope: &Value, parsed_result: &Value) -> Resolution {
    for hypothesis in HYPOTHESES {
        if let Some(url) = hypothesis.probe(envelope, parsed_result) {
            obs::emit_url_resolved(hypothesis.as_str());
            return Resolution {
                url,
                hypothesis: Some(hypothesis),
            };
        }
    }

    obs::emit_url_exhausted(HYPOTHESES.len());
    Resolution {
        url: String::new(),
        hypothesis: None,
    }
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn module_outputs(envelope: &Value) -> Option<&Value> {
    present(envelope.get("module_outputs"))
}

fn non_empty(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// First non-empty string among `fields` of a mapping.
fn first_field(value: &Value, fields: &[&str]) -> Option<String> {
    let map = value.as_object()?;
    fields.iter().find_map(|field| non_empty(map.get(*field)))
}

/// `file_url`, else `url`, of the first element of a descriptor list.
fn first_descriptor(value: &Value) -> Option<String> {
    let first = value.as_array()?.first()?;
    first_field(first, &DESCRIPTOR_FIELDS)
}

/// Treat a decoded `raw_response` as a secondary envelope.
///
/// Runs at most one extraction and never recurses into the secondary
/// envelope's own `raw_response`.
fn probe_raw_response(raw: &Value) -> Option<String> {
    let secondary = extract::parse(raw).into_value()?;

    let outputs = RAW_MODULE_OUTPUT_POINTERS
        .iter()
        .find_map(|pointer| present(secondary.pointer(pointer)));

    if let Some(outputs) = outputs {
        let from_outputs = first_descriptor(outputs)
            .or_else(|| first_descriptor(outputs.get("artifact_files")?))
            .or_else(|| first_field(outputs, &MODULE_OUTPUT_FIELDS));
        if from_outputs.is_some() {
            return from_outputs;
        }
    }

    first_field(&secondary, &RAW_TOP_LEVEL_FIELDS)
        .or_else(|| non_empty(secondary.pointer("/response/image_url")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn probe_skips_wrong_shapes() {
        let envelope = json!({"module_outputs": {"url": "https://a/b.png"}});
        assert_eq!(
            ShapeHypothesis::ModuleOutputsList.probe(&envelope, &Value::Null),
            None
        );
        assert_eq!(
            ShapeHypothesis::ModuleOutputsMap.probe(&envelope, &Value::Null),
            Some("https://a/b.png".to_string())
        );
    }

    #[test]
    fn artifact_map_hypothesis_ignores_lists() {
        let envelope = json!({"module_outputs": {"artifact_files": [{"url": "x"}]}});
        assert_eq!(
            ShapeHypothesis::ModuleOutputsArtifactMap.probe(&envelope, &Value::Null),
            None
        );
    }

    #[test]
    fn empty_strings_do_not_count() {
        let envelope = json!({"module_outputs": [{"file_url": "", "url": "https://u"}]});
        assert_eq!(resolve_url(&envelope, &Value::Null), "https://u");
    }

    #[test]
    fn null_raw_response_is_skipped() {
        let envelope = json!({"raw_response": null});
        assert_eq!(resolve_url(&envelope, &Value::Null), "");
    }

    #[test]
    fn traced_reports_hypothesis() {
        let parsed = json!({"image": "https://p/i.jpg"});
        let res = resolve_url_traced(&json!({}), &parsed);
        assert_eq!(res.url, "https://p/i.jpg");
        assert_eq!(res.hypothesis, Some(ShapeHypothesis::ParsedResult));
        assert!(res.is_found());
    }

    #[test]
    fn hypothesis_names_are_snake_case() {
        for h in HYPOTHESES {
            let v = serde_json::to_value(h).expect("serialize");
            assert_eq!(v, json!(h.as_str()));
        }
    }
}
