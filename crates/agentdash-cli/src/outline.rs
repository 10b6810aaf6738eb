//! Plain-text outline of rendered markdown blocks.

use agentdash_core::{BlockNode, InlineRun};

fn runs_to_text(runs: &[InlineRun]) -> String {
    runs.iter()
        .map(|run| {
            if run.emphasized {
                format!("*{}*", run.text)
            } else {
                run.text.clone()
            }
        })
        .collect()
}

/// One line per block, tagged with its kind. Spacers become empty lines.
pub fn render_outline(blocks: &[BlockNode]) -> String {
    blocks
        .iter()
        .map(|block| match block {
            BlockNode::Heading { level, runs } => format!("[h{}] {}", level, runs_to_text(runs)),
            BlockNode::ListItem { ordered: true, runs } => format!("[ol] {}", runs_to_text(runs)),
            BlockNode::ListItem { ordered: false, runs } => format!("[ul] {}", runs_to_text(runs)),
            BlockNode::Paragraph { runs } => format!("[p] {}", runs_to_text(runs)),
            BlockNode::Spacer => String::new(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentdash_core::render;

    #[test]
    fn outline_tags_each_block() {
        let blocks = render("# Title\n\n- **a** b\n2. c\nplain");
        assert_eq!(
            render_outline(&blocks),
            "[h1] Title\n\n[ul] *a* b\n[ol] c\n[p] plain"
        );
    }
}
