//! agentdash core library
//!
//! Normalizes the unreliable output of the dashboard's AI agents into
//! predictable values:
//!
//! - [`extract`]: lenient JSON extraction from agent text
//! - [`resolve`]: media URL lookup across envelope shapes
//! - [`markdown`]: block rendering for the agents' markdown subset
//!
//! [`envelope`], [`records`] and [`outcome`] compose those three for each
//! agent; [`agents`] builds the request messages.

pub mod agents;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod markdown;
pub mod obs;
pub mod outcome;
pub mod records;
pub mod resolve;
pub mod telemetry;

pub use agents::{
    AgentDirectory, AgentKind, AnalysisDepth, AspectRatio, ContentBrief, ContentType,
    GraphicBrief, SeoRequest, Tone, VisualStyle,
};
pub use envelope::{AgentEnvelope, Payload};
pub use error::{DashError, Result};
pub use extract::{parse, parse_text, Extraction, FailureReason, RepairPass};
pub use markdown::{render, BlockNode, InlineRun};
pub use outcome::{
    normalize, normalize_content, normalize_graphic, normalize_seo, ActivityEntry, AgentOutcome,
    GraphicOutcome, MISSING_IMAGE_URL,
};
pub use records::{
    AgentRecord, ContentRecord, GraphicRecord, KeywordAnalysis, KeywordItem, MetaSuggestions,
    OptimizationTip, Priority, ScoreBand, SeoRecord,
};
pub use resolve::{resolve_url, resolve_url_traced, Resolution, ShapeHypothesis, HYPOTHESES};
pub use telemetry::init_tracing;

/// agentdash version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
