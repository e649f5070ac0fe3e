//! Indented text tree, one line per compact node

use anyhow::Result;
use std::io::Write;

use super::{DocumentView, Formatter, HeaderContext};
use crate::core::CompactNode;

const PREVIEW_CHARS: usize = 40;

pub struct TreeFormatter {
    max_depth: usize,
}

impl TreeFormatter {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }

    fn write_node(&self, output: &mut dyn Write, node: &CompactNode, depth: usize) -> Result<()> {
        let indent = "  ".repeat(depth);
        writeln!(output, "{}{}", indent, describe(node))?;

        let children = node.children();
        if children.is_empty() {
            return Ok(());
        }
        if depth + 1 >= self.max_depth {
            writeln!(output, "{}  ... (max depth, {} hidden)", indent, children.len())?;
            return Ok(());
        }
        for child in children {
            self.write_node(output, child, depth + 1)?;
        }
        Ok(())
    }
}

/// `[FR] Card lm=H is=8 f=#ffffff "preview"`
fn describe(node: &CompactNode) -> String {
    let mut line = format!("[{}] {}", node.kind().unwrap_or("?"), node.name());
    if let CompactNode::Element(el) = node {
        if let Some(layout) = &el.layout {
            line.push_str(&format!(" lm={}", layout.mode));
            if let Some(spacing) = &layout.spacing {
                line.push_str(&format!(" is={}", spacing));
            }
        }
        if let Some(fill) = &el.fill {
            line.push_str(&format!(" f={}", fill));
        }
        if let Some(value) = &el.value {
            line.push_str(&format!(" \"{}\"", preview(value)));
        }
    }
    line
}

fn preview(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
    format!("{}…", cut)
}

impl Formatter for TreeFormatter {
    fn write_header(&mut self, output: &mut dyn Write, context: HeaderContext) -> Result<()> {
        if let Some(p) = context.prompt {
            writeln!(output, "{}", p)?;
            writeln!(output)?;
        }
        if let Some(count) = context.token_count {
            writeln!(output, "Total tokens: {}", count)?;
            writeln!(output)?;
        }
        Ok(())
    }

    fn write_document(&mut self, output: &mut dyn Write, document: &DocumentView) -> Result<()> {
        writeln!(output, "=== {} ===", document.source)?;
        match document.tree {
            Some(tree) => self.write_node(output, tree, 0)?,
            None => writeln!(output, "(nothing visible)")?,
        }
        writeln!(output)?;
        Ok(())
    }

    fn write_footer(&mut self, _output: &mut dyn Write) -> Result<()> {
        Ok(())
    }
}
