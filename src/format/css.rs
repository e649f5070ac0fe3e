//! CSS output: background declarations of each raw root node

use anyhow::Result;
use std::io::Write;

use super::{DocumentView, Formatter, HeaderContext};
use crate::utils::css::node_background;

pub struct CssFormatter;

/// Turns a layer name into something usable as a class name.
fn class_name(name: &str) -> String {
    let slug: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() { "root".to_string() } else { slug }
}

impl Formatter for CssFormatter {
    fn write_header(&mut self, output: &mut dyn Write, context: HeaderContext) -> Result<()> {
        if let Some(p) = context.prompt {
            writeln!(output, "/* {} */", p.replace("*/", "* /"))?;
            writeln!(output)?;
        }
        Ok(())
    }

    fn write_document(&mut self, output: &mut dyn Write, document: &DocumentView) -> Result<()> {
        let name = document.raw.get("name").and_then(|n| n.as_str()).unwrap_or_default();
        writeln!(output, "/* {} */", document.source.replace("*/", "* /"))?;
        writeln!(output, ".{} {{", class_name(name))?;
        for (property, value) in node_background(document.raw).declarations() {
            writeln!(output, "  {}: {};", property, value)?;
        }
        writeln!(output, "}}")?;
        writeln!(output)?;
        Ok(())
    }

    fn write_footer(&mut self, _output: &mut dyn Write) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_css_rule() {
        let raw = json!({
            "name": "Primary Button",
            "fills": [{"type": "SOLID", "blendMode": "MULTIPLY", "color": {"r": 0, "g": 0, "b": 0, "a": 1}}]
        });
        let mut output = Vec::new();
        CssFormatter
            .write_document(
                &mut output,
                &DocumentView {
                    source: "button.json",
                    raw: &raw,
                    tree: None,
                },
            )
            .unwrap();
        let css = String::from_utf8(output).unwrap();
        assert!(css.contains(".primary-button {"));
        assert!(css.contains("  background: rgba(0, 0, 0, 1);"));
        assert!(css.contains("  mix-blend-mode: multiply;"));
    }

    #[test]
    fn test_class_name() {
        assert_eq!(class_name("Card / Large"), "card---large");
        assert_eq!(class_name("  "), "root");
    }
}
