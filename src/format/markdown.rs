//! Markdown output format for figpress

use anyhow::Result;
use std::io::Write;

use super::{DocumentView, Formatter, HeaderContext};
use crate::core::keys;

pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn write_header(&mut self, output: &mut dyn Write, context: HeaderContext) -> Result<()> {
        writeln!(output, "# Design Context")?;
        writeln!(output)?;
        if let Some(p) = context.prompt {
            writeln!(output, "{}", p)?;
            writeln!(output)?;
        }
        if let Some(count) = context.token_count {
            writeln!(output, "Token count: {}", count)?;
            writeln!(output)?;
        }
        if context.legend {
            writeln!(output, "## Keys")?;
            writeln!(output)?;
            writeln!(output, "| Key | Field |")?;
            writeln!(output, "|-----|-------|")?;
            for (short, raw) in keys::legend() {
                writeln!(output, "| `{}` | {} |", short, raw)?;
            }
            writeln!(output)?;
            writeln!(output, "Type `IC` marks an icon whose contents were omitted.")?;
            writeln!(output)?;
        }
        Ok(())
    }

    fn write_document(&mut self, output: &mut dyn Write, document: &DocumentView) -> Result<()> {
        writeln!(output, "## {}", document.source)?;
        writeln!(output)?;
        match document.tree {
            Some(tree) => {
                writeln!(output, "```json")?;
                writeln!(output, "{}", serde_json::to_string_pretty(tree)?)?;
                writeln!(output, "```")?;
            }
            None => writeln!(output, "_Nothing visible to show._")?,
        }
        writeln!(output)?;
        Ok(())
    }

    fn write_footer(&mut self, _output: &mut dyn Write) -> Result<()> {
        Ok(())
    }
}
