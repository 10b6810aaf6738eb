//! Structured observability hooks for response normalization.
//!
//! Each function emits one event with an `event` field naming it, so log
//! pipelines can filter on `event = "extract.repaired"` and friends.
//! Normal-path events go out at `debug!`; degraded outcomes at `warn!`.

use tracing::{debug, warn};

/// Emit event: a candidate needed a repair pass before it parsed.
pub fn emit_extraction_repaired(pass: &str, candidate_len: usize) {
    debug!(event = "extract.repaired", pass = %pass, candidate_len = candidate_len);
}

/// Emit event: every repair pass was exhausted.
pub fn emit_extraction_failed(candidate_len: usize) {
    debug!(event = "extract.failed", candidate_len = candidate_len);
}

/// Emit event: a shape hypothesis produced a URL.
pub fn emit_url_resolved(hypothesis: &str) {
    debug!(event = "resolve.matched", hypothesis = %hypothesis);
}

/// Emit event: no shape hypothesis produced a URL.
pub fn emit_url_exhausted(hypotheses_tried: usize) {
    debug!(event = "resolve.exhausted", hypotheses_tried = hypotheses_tried);
}

/// Emit event: an agent outcome was normalized into a failure.
pub fn emit_outcome_failed(agent: &str, message: &str) {
    warn!(event = "outcome.failed", agent = %agent, message = %message);
}

/// Emit event: the agent succeeded but its payload could not be decoded.
pub fn emit_outcome_degraded(agent: &str, reason: &dyn std::fmt::Display) {
    warn!(event = "outcome.degraded", agent = %agent, reason = %reason);
}
