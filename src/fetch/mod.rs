//! Document fetching for figpress
//!
//! Resolves where a document comes from (a Figma link, a local JSON export or
//! stdin), retrieves it and hands back the raw root node. Every failure here
//! happens before the compressor runs.

pub mod client;
pub mod document;
pub mod error;
pub mod location;

use std::io::Read;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;

pub use client::{FigmaClient, HttpClientConfig};
pub use document::extract_root;
pub use error::{FetchError, FetchResult};
pub use location::FigmaLocation;

pub fn is_remote_url(input: &str) -> bool {
    input.starts_with("https://") || input.starts_with("http://")
}

/// Where a raw document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Remote(FigmaLocation),
    File(PathBuf),
    Stdin,
}

impl DocumentSource {
    /// `-` means stdin, `http(s)://` means a Figma link, anything else is a
    /// path to a JSON export.
    pub fn parse(input: &str) -> FetchResult<Self> {
        if input == "-" {
            Ok(DocumentSource::Stdin)
        } else if is_remote_url(input) {
            FigmaLocation::parse(input).map(DocumentSource::Remote)
        } else {
            Ok(DocumentSource::File(PathBuf::from(input)))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, DocumentSource::Remote(_))
    }

    /// Loads the raw root node. Remote sources need a client.
    pub fn load(&self, client: Option<&FigmaClient>) -> FetchResult<Value> {
        match self {
            DocumentSource::Remote(location) => {
                let client = client.ok_or_else(|| FetchError::MissingToken(location.to_string()))?;
                let response = client.fetch(location)?;
                extract_root(response, location.node_id.as_deref())
            }
            DocumentSource::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| FetchError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                parse_document(&text)
            }
            DocumentSource::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|source| FetchError::Io {
                        path: "<stdin>".to_string(),
                        source,
                    })?;
                parse_document(&text)
            }
        }
    }
}

impl std::fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentSource::Remote(location) => write!(f, "figma:{}", location),
            DocumentSource::File(path) => write!(f, "{}", path.display()),
            DocumentSource::Stdin => write!(f, "<stdin>"),
        }
    }
}

/// Decodes JSON of any nesting depth. Deep trees are bounded later by the
/// compressor's `max_depth`, not by the parser.
pub fn decode_json(text: &str) -> FetchResult<Value> {
    let decode = |e: serde_json::Error| FetchError::Decode(e.to_string());
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de)).map_err(decode)?;
    de.end().map_err(decode)?;
    Ok(value)
}

/// Parses a saved API response or a bare node export.
pub fn parse_document(text: &str) -> FetchResult<Value> {
    extract_root(decode_json(text)?, None)
}
