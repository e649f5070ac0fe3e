//! Output format modules for figpress

pub mod css;
pub mod json;
pub mod markdown;
pub mod tree;

use anyhow::Result;
use serde_json::Value;
use std::io::Write;

use crate::config::OutputFormat;
use crate::core::CompactNode;

/// Context passed to formatters when writing headers
pub struct HeaderContext<'a> {
    pub prompt: Option<&'a str>,
    pub token_count: Option<usize>,
    /// Emit the short-key legend
    pub legend: bool,
}

/// One loaded document: its raw root and what survived compression.
pub struct DocumentView<'a> {
    pub source: &'a str,
    pub raw: &'a Value,
    /// `None` when nothing in the document was visible
    pub tree: Option<&'a CompactNode>,
}

pub trait Formatter {
    fn write_header(&mut self, output: &mut dyn Write, context: HeaderContext) -> Result<()>;

    fn write_document(&mut self, output: &mut dyn Write, document: &DocumentView) -> Result<()>;

    fn write_footer(&mut self, output: &mut dyn Write) -> Result<()>;
}

pub fn create_formatter(format: OutputFormat, tree_depth: usize) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(json::JsonFormatter::new()),
        OutputFormat::Markdown => Box::new(markdown::MarkdownFormatter),
        OutputFormat::Tree => Box::new(tree::TreeFormatter::new(tree_depth)),
        OutputFormat::Css => Box::new(css::CssFormatter),
    }
}

/// Renders a whole run into a string.
pub fn render(
    format: OutputFormat,
    tree_depth: usize,
    context: HeaderContext,
    documents: &[DocumentView],
) -> Result<String> {
    let mut formatter = create_formatter(format, tree_depth);
    let mut output = Vec::new();
    formatter.write_header(&mut output, context)?;
    for document in documents {
        formatter.write_document(&mut output, document)?;
    }
    formatter.write_footer(&mut output)?;
    Ok(String::from_utf8(output)?)
}
