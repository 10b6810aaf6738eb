use serde::{Deserialize, Serialize};

use super::lenient;
use super::AgentRecord;
use crate::agents::AgentKind;

/// Output of the SEO analyzer agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoRecord {
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub readability_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub readability_grade: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub keyword_analysis: Option<KeywordAnalysis>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub meta_suggestions: Option<MetaSuggestions>,
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Option::is_none")]
    pub heading_recommendations: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Option::is_none")]
    pub optimization_tips: Option<Vec<OptimizationTip>>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub content_length_assessment: Option<String>,
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Option::is_none")]
    pub competitive_insights: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Option::is_none")]
    pub primary_keywords: Option<Vec<KeywordItem>>,
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Option::is_none")]
    pub secondary_keywords: Option<Vec<KeywordItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordItem {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// Free text such as `"2.8%"`; bare numbers are kept as their spelling.
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub density: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaSuggestions {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizationTip {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl OptimizationTip {
    pub fn priority_level(&self) -> Priority {
        Priority::from_label(self.priority.as_deref().unwrap_or_default())
    }
}

/// Urgency of an optimization tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Case-insensitive; anything unrecognised is `Low`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Priority::High,
            "medium" => Priority::Medium,
            _ => Priority::Low,
        }
    }
}

/// Coarse rating of a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn of(score: f64) -> Self {
        if score >= 70.0 {
            ScoreBand::Good
        } else if score >= 40.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }
}

impl SeoRecord {
    /// Overall score limited to `0..=100`; absent reads as 0.
    pub fn overall_score_clamped(&self) -> f64 {
        clamp_score(self.overall_score)
    }

    /// Readability score limited to `0..=100`; absent reads as 0.
    pub fn readability_score_clamped(&self) -> f64 {
        clamp_score(self.readability_score)
    }

    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::of(self.overall_score_clamped())
    }

    pub fn primary_keywords(&self) -> &[KeywordItem] {
        self.keyword_analysis
            .as_ref()
            .and_then(|k| k.primary_keywords.as_deref())
            .unwrap_or_default()
    }

    pub fn secondary_keywords(&self) -> &[KeywordItem] {
        self.keyword_analysis
            .as_ref()
            .and_then(|k| k.secondary_keywords.as_deref())
            .unwrap_or_default()
    }
}

fn clamp_score(score: Option<f64>) -> f64 {
    score.unwrap_or(0.0).clamp(0.0, 100.0)
}

impl AgentRecord for SeoRecord {
    const KIND: AgentKind = AgentKind::SeoAnalyzer;
}
