//! The three dashboard agents and the request messages sent to them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DashError, Result};

/// Which dashboard agent a request or response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    ContentWriter,
    SeoAnalyzer,
    GraphicsGenerator,
}

impl AgentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::ContentWriter => "content_writer",
            AgentKind::SeoAnalyzer => "seo_analyzer",
            AgentKind::GraphicsGenerator => "graphics_generator",
        }
    }

    /// Built-in agent identifier.
    pub fn default_agent_id(&self) -> &'static str {
        match self {
            AgentKind::ContentWriter => "699207063361b44adf2951f0",
            AgentKind::SeoAnalyzer => "6992070761e2cce880e01709",
            AgentKind::GraphicsGenerator => "6992070772b5bcf5c3207f93",
        }
    }

    /// Message shown when the envelope reports failure without an error.
    pub fn failure_message(&self) -> &'static str {
        match self {
            AgentKind::ContentWriter => "Failed to generate content. Please try again.",
            AgentKind::SeoAnalyzer => "Failed to analyze content. Please try again.",
            AgentKind::GraphicsGenerator => "Failed to generate graphic. Please try again.",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Agent identifiers in use, defaulting to the built-in ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDirectory {
    pub content_writer: String,
    pub seo_analyzer: String,
    pub graphics_generator: String,
}

impl Default for AgentDirectory {
    fn default() -> Self {
        Self {
            content_writer: AgentKind::ContentWriter.default_agent_id().to_string(),
            seo_analyzer: AgentKind::SeoAnalyzer.default_agent_id().to_string(),
            graphics_generator: AgentKind::GraphicsGenerator.default_agent_id().to_string(),
        }
    }
}

impl AgentDirectory {
    pub fn agent_id(&self, kind: AgentKind) -> &str {
        match kind {
            AgentKind::ContentWriter => &self.content_writer,
            AgentKind::SeoAnalyzer => &self.seo_analyzer,
            AgentKind::GraphicsGenerator => &self.graphics_generator,
        }
    }
}

// ---------------------------------------------------------------------------
// Option sets
// ---------------------------------------------------------------------------

/// Declares a closed set of labelled options with `FromStr`/`Display`.
macro_rules! labelled_options {
    ($(#[$meta:meta])* $name:ident, $kind:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = DashError;

            /// Case-insensitive match on the label.
            fn from_str(s: &str) -> Result<Self> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| option.label().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| DashError::UnknownOption {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

labelled_options!(
    /// Kind of copy the content writer produces.
    ContentType, "content type", {
        BlogPost => "Blog Post",
        AdCopy => "Ad Copy",
        SocialCaption => "Social Caption",
        EmailNewsletter => "Email Newsletter",
        LandingPage => "Landing Page",
    }
);

labelled_options!(
    Tone, "tone", {
        Professional => "Professional",
        Casual => "Casual",
        Bold => "Bold",
        Persuasive => "Persuasive",
    }
);

labelled_options!(
    VisualStyle, "visual style", {
        Modern => "Modern",
        Minimalist => "Minimalist",
        Bold => "Bold",
        Illustrative => "Illustrative",
        Photographic => "Photographic",
    }
);

labelled_options!(
    AspectRatio, "aspect ratio", {
        Square => "1:1",
        Landscape => "16:9",
        Portrait => "4:5",
        Story => "9:16",
    }
);

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DashError::EmptyField { field });
    }
    Ok(trimmed)
}

/// Brief for the content writer agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBrief {
    pub topic: String,
    pub content_type: ContentType,
    pub tone: Tone,
    /// Blank means a general audience.
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl ContentBrief {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            content_type: ContentType::BlogPost,
            tone: Tone::Professional,
            target_audience: String::new(),
            keywords: Vec::new(),
        }
    }

    /// Add a keyword. Returns `false` for blank or duplicate keywords.
    pub fn add_keyword(&mut self, keyword: &str) -> bool {
        let trimmed = keyword.trim();
        if trimmed.is_empty() || self.keywords.iter().any(|k| k == trimmed) {
            return false;
        }
        self.keywords.push(trimmed.to_string());
        true
    }

    /// Remove a keyword. Returns `false` if it was not present.
    pub fn remove_keyword(&mut self, keyword: &str) -> bool {
        let before = self.keywords.len();
        self.keywords.retain(|k| k != keyword);
        self.keywords.len() != before
    }

    pub fn to_message(&self) -> Result<String> {
        let topic = require("topic", &self.topic)?;
        let audience = match self.target_audience.trim() {
            "" => "general audience",
            audience => audience,
        };
        let keywords = if self.keywords.is_empty() {
            String::new()
        } else {
            format!("Include these keywords: {}", self.keywords.join(", "))
        };
        Ok(format!(
            "Generate a {ty} about \"{topic}\" in a {tone} tone for {audience}. {keywords} Format: {ty}",
            ty = self.content_type,
            tone = self.tone,
        ))
    }
}

/// How deep the SEO analyzer should go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisDepth {
    #[default]
    Full,
    Quick,
}

impl AnalysisDepth {
    /// Name used for the recent-outputs entry.
    pub fn title(&self) -> &'static str {
        match self {
            AnalysisDepth::Full => "SEO Full Analysis",
            AnalysisDepth::Quick => "SEO Quick Scan",
        }
    }
}

impl FromStr for AnalysisDepth {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(AnalysisDepth::Full),
            "quick" => Ok(AnalysisDepth::Quick),
            _ => Err(DashError::UnknownOption {
                kind: "analysis depth",
                value: s.to_string(),
            }),
        }
    }
}

/// Request for the SEO analyzer agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoRequest {
    pub content: String,
    #[serde(default)]
    pub depth: AnalysisDepth,
}

impl SeoRequest {
    pub fn to_message(&self) -> Result<String> {
        require("content", &self.content)?;
        let lead = match self.depth {
            AnalysisDepth::Full => "Perform a comprehensive SEO analysis",
            AnalysisDepth::Quick => "Perform a quick SEO scan",
        };
        Ok(format!(
            "{lead} on the following content:\n\n{}",
            self.content
        ))
    }
}

/// Brief for the graphics generator agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphicBrief {
    pub description: String,
    pub style: VisualStyle,
    pub aspect_ratio: AspectRatio,
}

impl GraphicBrief {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            style: VisualStyle::Modern,
            aspect_ratio: AspectRatio::Square,
        }
    }

    pub fn to_message(&self) -> Result<String> {
        require("description", &self.description)?;
        Ok(format!(
            "Create a {} style marketing visual: {}. Aspect ratio: {}",
            self.style, self.description, self.aspect_ratio
        ))
    }
}
