use serde::{Deserialize, Serialize};

use super::lenient;
use super::AgentRecord;
use crate::agents::AgentKind;
use crate::markdown::{self, BlockNode};

/// Output of the content writer agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Markdown body.
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(default, deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub estimated_read_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Option::is_none")]
    pub keywords_used: Option<Vec<String>>,
}

impl ContentRecord {
    /// Render the body into display blocks.
    pub fn blocks(&self) -> Vec<BlockNode> {
        self.content.as_deref().map(markdown::render).unwrap_or_default()
    }
}

impl AgentRecord for ContentRecord {
    const KIND: AgentKind = AgentKind::ContentWriter;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_record() {
        let record = ContentRecord::from_value(&json!({
            "title": "AI Trends",
            "content": "## Intro\n\nBody",
            "content_type": "Blog Post",
            "tone": "Professional",
            "word_count": 187,
            "estimated_read_time": "2 min read",
            "keywords_used": ["AI", "marketing"]
        }));
        assert_eq!(record.title.as_deref(), Some("AI Trends"));
        assert_eq!(record.word_count, Some(187));
        assert_eq!(
            record.keywords_used,
            Some(vec!["AI".to_string(), "marketing".to_string()])
        );
        assert_eq!(record.blocks().len(), 3);
    }

    #[test]
    fn wrong_field_types_do_not_discard_record() {
        let record = ContentRecord::from_value(&json!({
            "title": "Kept",
            "word_count": "212",
            "keywords_used": ["ok", 7, null, "also ok"],
            "tone": {"nested": true}
        }));
        assert_eq!(record.title.as_deref(), Some("Kept"));
        assert_eq!(record.word_count, Some(212));
        assert_eq!(
            record.keywords_used,
            Some(vec!["ok".to_string(), "also ok".to_string()])
        );
        assert_eq!(record.tone, None);
    }

    #[test]
    fn non_mapping_yields_default() {
        assert_eq!(ContentRecord::from_value(&json!("text")), ContentRecord::default());
        assert!(ContentRecord::default().blocks().is_empty());
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let v = serde_json::to_value(ContentRecord {
            title: Some("T".to_string()),
            ..Default::default()
        })
        .expect("serialize");
        assert_eq!(v, json!({"title": "T"}));
    }
}
