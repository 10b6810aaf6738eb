//! Line-oriented renderer for the markdown subset agents write.
//!
//! Every input line becomes exactly one [`BlockNode`]. Supported markers:
//! `#`, `##`, `###` headings, `-`/`*` bullets, `1.` numbered items and
//! `**bold**` inline emphasis. Anything else is a paragraph.

use serde::Serialize;

const EMPHASIS: &str = "**";

/// A run of text with uniform emphasis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineRun {
    pub text: String,
    pub emphasized: bool,
}

impl InlineRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// One rendered line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockNode {
    Heading { level: u8, runs: Vec<InlineRun> },
    ListItem { ordered: bool, runs: Vec<InlineRun> },
    Paragraph { runs: Vec<InlineRun> },
    Spacer,
}

impl BlockNode {
    /// Inline runs of the block; empty for [`BlockNode::Spacer`].
    pub fn runs(&self) -> &[InlineRun] {
        match self {
            BlockNode::Heading { runs, .. }
            | BlockNode::ListItem { runs, .. }
            | BlockNode::Paragraph { runs } => runs,
            BlockNode::Spacer => &[],
        }
    }

    /// Concatenated text of all runs, markers removed.
    pub fn plain_text(&self) -> String {
        self.runs().iter().map(|r| r.text.as_str()).collect()
    }
}

type Classifier = fn(&str) -> Option<BlockNode>;

/// Line classifiers in precedence order. Longer markers come first.
const CLASSIFIERS: [Classifier; 7] = [
    |line| heading(line, "### ", 3),
    |line| heading(line, "## ", 2),
    |line| heading(line, "# ", 1),
    bullet_item,
    numbered_item,
    spacer,
    |line| Some(BlockNode::Paragraph { runs: inline_runs(line) }),
];

/// Render `text` into one block per line.
///
/// Empty input renders to no blocks. A trailing `\r` on each line is
/// ignored.
pub fn render(text: &str) -> Vec<BlockNode> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n').map(render_line).collect()
}

fn render_line(line: &str) -> BlockNode {
    let line = line.strip_suffix('\r').unwrap_or(line);
    CLASSIFIERS
        .iter()
        .find_map(|classify| classify(line))
        .unwrap_or(BlockNode::Spacer)
}

fn heading(line: &str, marker: &str, level: u8) -> Option<BlockNode> {
    let rest = line.strip_prefix(marker)?;
    Some(BlockNode::Heading {
        level,
        runs: inline_runs(rest),
    })
}

fn bullet_item(line: &str) -> Option<BlockNode> {
    let rest = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))?;
    Some(BlockNode::ListItem {
        ordered: false,
        runs: inline_runs(rest),
    })
}

fn numbered_item(line: &str) -> Option<BlockNode> {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    let gap = rest.chars().next().filter(|c| c.is_whitespace())?;
    Some(BlockNode::ListItem {
        ordered: true,
        runs: inline_runs(&rest[gap.len_utf8()..]),
    })
}

fn spacer(line: &str) -> Option<BlockNode> {
    line.trim().is_empty().then_some(BlockNode::Spacer)
}

/// Split a line on paired `**` delimiters.
///
/// Text inside a pair is emphasized. A final unpaired `**` stays in the
/// output as literal text. Empty runs are dropped.
pub fn inline_runs(text: &str) -> Vec<InlineRun> {
    let mut runs = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(EMPHASIS) {
        let inner_start = open + EMPHASIS.len();
        let Some(close) = rest[inner_start..].find(EMPHASIS) else {
            break;
        };
        push_run(&mut runs, &rest[..open], false);
        push_run(&mut runs, &rest[inner_start..inner_start + close], true);
        rest = &rest[inner_start + close + EMPHASIS.len()..];
    }
    push_run(&mut runs, rest, false);

    runs
}

fn push_run(runs: &mut Vec<InlineRun>, text: &str, emphasized: bool) {
    if text.is_empty() {
        return;
    }
    runs.push(InlineRun {
        text: text.to_string(),
        emphasized,
    });
}
