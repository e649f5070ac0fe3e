//! JSON output format for figpress

use anyhow::Result;
use serde_json::{Map, Value};

use std::io::Write;

use super::{DocumentView, Formatter, HeaderContext};
use crate::core::keys;

pub struct JsonFormatter {
    first_document: bool,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(serde::Serialize)]
struct DocumentEntry<'a> {
    source: &'a str,
    tree: Option<&'a crate::core::CompactNode>,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {
            first_document: true,
        }
    }
}

impl Formatter for JsonFormatter {
    fn write_header(&mut self, output: &mut dyn Write, context: HeaderContext) -> Result<()> {
        writeln!(output, "{{")?;
        if let Some(p) = context.prompt {
            writeln!(output, "  \"prompt\": {},", serde_json::to_string(p)?)?;
        }
        if let Some(count) = context.token_count {
            writeln!(output, "  \"token_count\": {},", count)?;
        }
        if context.legend {
            let legend: Map<String, Value> = keys::legend()
                .into_iter()
                .map(|(short, raw)| (short.to_string(), Value::from(raw)))
                .collect();
            writeln!(output, "  \"legend\": {},", serde_json::to_string(&legend)?)?;
        }
        writeln!(output, "  \"documents\": [")?;
        Ok(())
    }

    fn write_document(&mut self, output: &mut dyn Write, document: &DocumentView) -> Result<()> {
        if !self.first_document {
            writeln!(output, ",")?;
        }
        self.first_document = false;

        // One minified object per document; an elided tree is written as null
        let entry = DocumentEntry {
            source: document.source,
            tree: document.tree,
        };
        write!(output, "    {}", serde_json::to_string(&entry)?)?;
        Ok(())
    }

    fn write_footer(&mut self, output: &mut dyn Write) -> Result<()> {
        if !self.first_document {
            writeln!(output)?;
        }
        writeln!(output, "  ]")?;
        writeln!(output, "}}")?;
        Ok(())
    }
}
