//! Typed records decoded from agent results.
//!
//! Every field is optional and decoding is total: a field with the wrong
//! JSON type reads as absent, and a result that is not a mapping yields the
//! default record.

mod content;
mod graphic;
mod lenient;
mod seo;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::agents::AgentKind;

pub use content::ContentRecord;
pub use graphic::GraphicRecord;
pub use seo::{
    KeywordAnalysis, KeywordItem, MetaSuggestions, OptimizationTip, Priority, ScoreBand,
    SeoRecord,
};

/// A record produced by one of the dashboard agents.
pub trait AgentRecord: DeserializeOwned + Serialize + Default {
    /// The agent that produces this record.
    const KIND: AgentKind;

    /// Decode from a normalized result value. Never fails.
    fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}
