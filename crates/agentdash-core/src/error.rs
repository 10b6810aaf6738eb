//! Error taxonomy for the fallible edges of agentdash.
//!
//! The extractor, resolver and renderer are total and never produce these.
//! Only boundary work (decoding an envelope, validating a brief) does.

/// Errors produced at the agentdash boundary.
#[derive(Debug, thiserror::Error)]
pub enum DashError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("unknown {kind}: {value}")]
    UnknownOption { kind: &'static str, value: String },

    #[error("invalid envelope: {0}")]
    InvalidEnvelope(String),
}

/// Result type for agentdash boundary operations.
pub type Result<T> = std::result::Result<T, DashError>;
