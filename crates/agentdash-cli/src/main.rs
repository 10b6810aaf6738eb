//! agentdash - inspect and normalize dashboard agent responses
//!
//! ## Commands
//!
//! - `parse`: leniently extract JSON from agent text
//! - `resolve-url`: find the media URL in a response envelope
//! - `render`: render agent markdown into blocks
//! - `normalize`: turn an envelope into a typed outcome
//! - `prompt`: build the request message for an agent

mod input;
mod outline;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, Level};

use agentdash_core::{
    normalize_content, normalize_graphic, normalize_seo, AgentDirectory, AgentEnvelope,
    AgentKind, AnalysisDepth, AspectRatio, ContentBrief, ContentType, GraphicBrief, SeoRequest,
    Tone, VisualStyle,
};

use crate::input::read_input;
use crate::outline::render_outline;

#[derive(Parser)]
#[command(name = "agentdash")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Normalize responses from the dashboard's AI agents", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Leniently extract a JSON value from agent text
    Parse {
        /// Input file, or `-` for stdin
        input: PathBuf,
    },

    /// Print the media URL found in a response envelope
    ResolveUrl {
        /// Envelope file, or `-` for stdin
        envelope: PathBuf,

        /// Also print which envelope shape matched
        #[arg(long)]
        explain: bool,
    },

    /// Render agent markdown into display blocks
    Render {
        /// Input file, or `-` for stdin
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = RenderFormat::Json)]
        format: RenderFormat,
    },

    /// Normalize a response envelope into a typed outcome
    Normalize {
        /// Which agent produced the envelope
        #[arg(short, long, value_enum)]
        agent: AgentArg,

        /// Envelope file, or `-` for stdin
        envelope: PathBuf,
    },

    /// Build the request message for an agent
    Prompt {
        #[command(flatten)]
        ids: AgentIdArgs,

        #[command(subcommand)]
        request: PromptRequest,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RenderFormat {
    Json,
    Text,
}

#[derive(Clone, Copy, ValueEnum)]
enum AgentArg {
    Content,
    Seo,
    Graphic,
}

impl From<AgentArg> for AgentKind {
    fn from(arg: AgentArg) -> Self {
        match arg {
            AgentArg::Content => AgentKind::ContentWriter,
            AgentArg::Seo => AgentKind::SeoAnalyzer,
            AgentArg::Graphic => AgentKind::GraphicsGenerator,
        }
    }
}

/// Agent identifier overrides.
#[derive(Args)]
struct AgentIdArgs {
    /// Content writer agent ID
    #[arg(long, env = "AGENTDASH_CONTENT_AGENT_ID")]
    content_agent_id: Option<String>,

    /// SEO analyzer agent ID
    #[arg(long, env = "AGENTDASH_SEO_AGENT_ID")]
    seo_agent_id: Option<String>,

    /// Graphics generator agent ID
    #[arg(long, env = "AGENTDASH_GRAPHIC_AGENT_ID")]
    graphic_agent_id: Option<String>,
}

impl AgentIdArgs {
    fn into_directory(self) -> AgentDirectory {
        let defaults = AgentDirectory::default();
        AgentDirectory {
            content_writer: self.content_agent_id.unwrap_or(defaults.content_writer),
            seo_analyzer: self.seo_agent_id.unwrap_or(defaults.seo_analyzer),
            graphics_generator: self.graphic_agent_id.unwrap_or(defaults.graphics_generator),
        }
    }
}

#[derive(Subcommand)]
enum PromptRequest {
    /// Content writer brief
    Content {
        /// Topic to write about
        topic: String,

        /// Content type (Blog Post, Ad Copy, Social Caption, Email Newsletter, Landing Page)
        #[arg(long, default_value = "Blog Post")]
        content_type: ContentType,

        /// Tone (Professional, Casual, Bold, Persuasive)
        #[arg(long, default_value = "Professional")]
        tone: Tone,

        /// Target audience
        #[arg(long, default_value = "")]
        audience: String,

        /// Keyword to include (repeatable)
        #[arg(short, long = "keyword")]
        keywords: Vec<String>,
    },

    /// SEO analysis request
    Seo {
        /// File with the content to analyze, or `-` for stdin
        input: PathBuf,

        /// Analysis depth (full, quick)
        #[arg(long, default_value = "full")]
        depth: AnalysisDepth,
    },

    /// Graphic brief
    Graphic {
        /// What the visual should show
        description: String,

        /// Visual style (Modern, Minimalist, Bold, Illustrative, Photographic)
        #[arg(long, default_value = "Modern")]
        style: VisualStyle,

        /// Aspect ratio (1:1, 16:9, 4:5, 9:16)
        #[arg(long, default_value = "1:1")]
        aspect_ratio: AspectRatio,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    agentdash_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Parse { input } => cmd_parse(&input),
        Commands::ResolveUrl { envelope, explain } => cmd_resolve_url(&envelope, explain),
        Commands::Render { input, format } => cmd_render(&input, format),
        Commands::Normalize { agent, envelope } => cmd_normalize(agent.into(), &envelope),
        Commands::Prompt { ids, request } => cmd_prompt(ids.into_directory(), request),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

fn load_envelope(path: &Path) -> Result<AgentEnvelope> {
    let text = read_input(path)?;
    AgentEnvelope::from_json_str(&text).with_context(|| format!("Invalid envelope in {:?}", path))
}

fn cmd_parse(input: &Path) -> Result<()> {
    let text = read_input(input)?;
    let extraction = agentdash_core::parse_text(&text);
    debug!(success = extraction.is_success(), "parsed input");
    print_json(&extraction)
}

fn cmd_resolve_url(envelope: &Path, explain: bool) -> Result<()> {
    let envelope = load_envelope(envelope)?;
    let parsed = envelope.normalized_result().into_value().unwrap_or(Value::Null);
    let resolution = agentdash_core::resolve_url_traced(envelope.source(), &parsed);

    if explain {
        let hypothesis = resolution.hypothesis.map_or("none", |h| h.as_str());
        println!("{}\t{}", resolution.url, hypothesis);
    } else {
        println!("{}", resolution.url);
    }
    Ok(())
}

fn cmd_render(input: &Path, format: RenderFormat) -> Result<()> {
    let text = read_input(input)?;
    let blocks = agentdash_core::render(&text);
    match format {
        RenderFormat::Json => print_json(&blocks),
        RenderFormat::Text => {
            println!("{}", render_outline(&blocks));
            Ok(())
        }
    }
}

fn cmd_normalize(kind: AgentKind, envelope: &Path) -> Result<()> {
    let envelope = load_envelope(envelope)?;
    match kind {
        AgentKind::ContentWriter => print_json(&normalize_content(&envelope)),
        AgentKind::SeoAnalyzer => print_json(&normalize_seo(&envelope)),
        AgentKind::GraphicsGenerator => print_json(&normalize_graphic(&envelope)),
    }
}

fn cmd_prompt(directory: AgentDirectory, request: PromptRequest) -> Result<()> {
    let (kind, message) = match request {
        PromptRequest::Content {
            topic,
            content_type,
            tone,
            audience,
            keywords,
        } => {
            let mut brief = ContentBrief::new(topic);
            brief.content_type = content_type;
            brief.tone = tone;
            brief.target_audience = audience;
            for keyword in &keywords {
                brief.add_keyword(keyword);
            }
            (AgentKind::ContentWriter, brief.to_message()?)
        }
        PromptRequest::Seo { input, depth } => {
            let request = SeoRequest {
                content: read_input(&input)?,
                depth,
            };
            (AgentKind::SeoAnalyzer, request.to_message()?)
        }
        PromptRequest::Graphic {
            description,
            style,
            aspect_ratio,
        } => {
            let brief = GraphicBrief {
                description,
                style,
                aspect_ratio,
            };
            (AgentKind::GraphicsGenerator, brief.to_message()?)
        }
    };

    print_json(&json!({
        "agent": kind,
        "agent_id": directory.agent_id(kind),
        "message": message,
    }))
}
