//! Turning an agent envelope into a typed outcome.
//!
//! This is where the extractor and the resolver meet: the envelope's result
//! is normalized once at the boundary, decoded into the agent's record, and
//! for graphics the media URL is located across envelope shapes.

use serde::Serialize;
use serde_json::Value;

use crate::agents::{AgentKind, ContentBrief, GraphicBrief, SeoRequest};
use crate::envelope::AgentEnvelope;
use crate::extract::Extraction;
use crate::obs;
use crate::records::{AgentRecord, ContentRecord, GraphicRecord, SeoRecord};
use crate::resolve::{self, ShapeHypothesis};

/// Failure message when the graphics agent succeeds without a file URL.
pub const MISSING_IMAGE_URL: &str =
    "Image was generated but no file URL was returned. Please try again.";

/// Longest activity title derived from a graphic description, in chars.
const ACTIVITY_TITLE_CHARS: usize = 50;

/// Result of one agent call, as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AgentOutcome<T> {
    Completed {
        record: T,
        /// Set when the agent succeeded but its result could not be decoded
        /// and `record` is the default.
        #[serde(skip_serializing_if = "Option::is_none")]
        degraded: Option<String>,
    },
    Failed {
        message: String,
    },
}

impl<T> AgentOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, AgentOutcome::Completed { .. })
    }

    pub fn record(&self) -> Option<&T> {
        match self {
            AgentOutcome::Completed { record, .. } => Some(record),
            AgentOutcome::Failed { .. } => None,
        }
    }

    pub fn into_record(self) -> Option<T> {
        match self {
            AgentOutcome::Completed { record, .. } => Some(record),
            AgentOutcome::Failed { .. } => None,
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            AgentOutcome::Completed { .. } => None,
            AgentOutcome::Failed { message } => Some(message),
        }
    }
}

/// A generated graphic: its metadata and where to fetch it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphicOutcome {
    pub meta: GraphicRecord,
    pub image_url: String,
    /// The envelope shape the URL was found in.
    pub matched: ShapeHypothesis,
}

struct Decoded<R> {
    record: R,
    value: Value,
    degraded: Option<String>,
}

fn fail<T>(kind: AgentKind, message: String) -> AgentOutcome<T> {
    obs::emit_outcome_failed(kind.as_str(), &message);
    AgentOutcome::Failed { message }
}

fn decode<R: AgentRecord>(envelope: &AgentEnvelope) -> Result<Decoded<R>, String> {
    if !envelope.success {
        return Err(envelope
            .error
            .clone()
            .unwrap_or_else(|| R::KIND.failure_message().to_string()));
    }

    match envelope.normalized_result() {
        Extraction::Success { value } => Ok(Decoded {
            record: R::from_value(&value),
            value,
            degraded: None,
        }),
        Extraction::Failure { reason, .. } => {
            obs::emit_outcome_degraded(R::KIND.as_str(), &reason);
            Ok(Decoded {
                record: R::default(),
                value: Value::Null,
                degraded: Some(reason.to_string()),
            })
        }
    }
}

/// Normalize an envelope into the record type `R`.
pub fn normalize<R: AgentRecord>(envelope: &AgentEnvelope) -> AgentOutcome<R> {
    match decode::<R>(envelope) {
        Ok(decoded) => AgentOutcome::Completed {
            record: decoded.record,
            degraded: decoded.degraded,
        },
        Err(message) => fail(R::KIND, message),
    }
}

pub fn normalize_content(envelope: &AgentEnvelope) -> AgentOutcome<ContentRecord> {
    normalize(envelope)
}

pub fn normalize_seo(envelope: &AgentEnvelope) -> AgentOutcome<SeoRecord> {
    normalize(envelope)
}

/// Normalize a graphics envelope. A success without any resolvable media
/// URL is reported as a failure.
pub fn normalize_graphic(envelope: &AgentEnvelope) -> AgentOutcome<GraphicOutcome> {
    let kind = AgentKind::GraphicsGenerator;
    let decoded = match decode::<GraphicRecord>(envelope) {
        Ok(decoded) => decoded,
        Err(message) => return fail(kind, message),
    };

    let resolution = resolve::resolve_url_traced(envelope.source(), &decoded.value);
    let Some(matched) = resolution.hypothesis else {
        return fail(kind, MISSING_IMAGE_URL.to_string());
    };

    AgentOutcome::Completed {
        record: GraphicOutcome {
            meta: decoded.record,
            image_url: resolution.url,
            matched,
        },
        degraded: decoded.degraded,
    }
}

/// An entry for the dashboard's recent-outputs list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub kind: AgentKind,
    pub title: String,
}

impl ActivityEntry {
    /// Titled after the generated content, or the topic when it has none.
    pub fn for_content(record: &ContentRecord, brief: &ContentBrief) -> Self {
        let title = record
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(brief.topic.as_str());
        Self {
            kind: AgentKind::ContentWriter,
            title: title.to_string(),
        }
    }

    pub fn for_seo(request: &SeoRequest) -> Self {
        Self {
            kind: AgentKind::SeoAnalyzer,
            title: request.depth.title().to_string(),
        }
    }

    /// Titled after the first 50 characters of the description.
    pub fn for_graphic(brief: &GraphicBrief) -> Self {
        Self {
            kind: AgentKind::GraphicsGenerator,
            title: brief
                .description
                .chars()
                .take(ACTIVITY_TITLE_CHARS)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::AnalysisDepth;
    use serde_json::json;

    #[test]
    fn failed_envelope_uses_error_text() {
        let env = AgentEnvelope::from_value(json!({"success": false, "error": "quota exceeded"}));
        let outcome = normalize_content(&env);
        assert_eq!(outcome.failure_message(), Some("quota exceeded"));
    }

    #[test]
    fn failed_envelope_falls_back_to_default_message() {
        let env = AgentEnvelope::from_value(json!({"success": false}));
        let outcome = normalize_seo(&env);
        assert_eq!(
            outcome.failure_message(),
            Some(AgentKind::SeoAnalyzer.failure_message())
        );
    }

    #[test]
    fn undecodable_result_degrades_to_default_record() {
        let env = AgentEnvelope::from_value(json!({
            "success": true,
            "response": {"result": "I could not produce JSON, sorry."}
        }));
        let outcome = normalize_content(&env);
        assert_eq!(
            outcome,
            AgentOutcome::Completed {
                record: ContentRecord::default(),
                degraded: Some("unparseable".to_string()),
            }
        );
    }

    #[test]
    fn graphic_without_url_fails() {
        let env = AgentEnvelope::from_value(json!({
            "success": true,
            "response": {"result": {"style": "Bold"}}
        }));
        assert_eq!(
            normalize_graphic(&env).failure_message(),
            Some(MISSING_IMAGE_URL)
        );
    }

    #[test]
    fn graphic_url_from_parsed_result() {
        let env = AgentEnvelope::from_value(json!({
            "success": true,
            "response": {"result": "{\"style\": \"Bold\", \"image_url\": \"https://cdn/i.png\"}"}
        }));
        let graphic = normalize_graphic(&env).into_record().expect("completed");
        assert_eq!(graphic.image_url, "https://cdn/i.png");
        assert_eq!(graphic.matched, ShapeHypothesis::ParsedResult);
        assert_eq!(graphic.meta.style.as_deref(), Some("Bold"));
    }

    #[test]
    fn activity_titles() {
        let brief = ContentBrief::new("Topic");
        let untitled = ContentRecord::default();
        assert_eq!(ActivityEntry::for_content(&untitled, &brief).title, "Topic");

        let titled = ContentRecord {
            title: Some("Real Title".to_string()),
            ..Default::default()
        };
        assert_eq!(ActivityEntry::for_content(&titled, &brief).title, "Real Title");

        let seo = SeoRequest {
            content: "x".to_string(),
            depth: AnalysisDepth::Full,
        };
        assert_eq!(ActivityEntry::for_seo(&seo).title, "SEO Full Analysis");

        let graphic = GraphicBrief::new("é".repeat(60));
        assert_eq!(ActivityEntry::for_graphic(&graphic).title.chars().count(), 50);
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let outcome: AgentOutcome<ContentRecord> = AgentOutcome::Failed {
            message: "nope".to_string(),
        };
        let v = serde_json::to_value(&outcome).expect("serialize");
        assert_eq!(v, json!({"status": "failed", "message": "nope"}));
    }
}
