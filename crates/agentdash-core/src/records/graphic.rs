use serde::{Deserialize, Serialize};

use super::lenient;
use super::AgentRecord;
use crate::agents::AgentKind;

/// Metadata returned by the graphics generator agent.
///
/// The image URL itself is located separately, see [`crate::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphicRecord {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub image_description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
}

impl AgentRecord for GraphicRecord {
    const KIND: AgentKind = AgentKind::GraphicsGenerator;
}
