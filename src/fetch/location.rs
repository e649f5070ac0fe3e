//! Figma share links -> file key and optional node id

use url::Url;

use super::error::{FetchError, FetchResult};

/// Path prefixes under which Figma serves a file key.
const FILE_ROUTES: &[&str] = &["file", "design", "proto"];

/// A file key plus an optional node id in API form (`381:150`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FigmaLocation {
    pub file_key: String,
    pub node_id: Option<String>,
}

impl FigmaLocation {
    pub fn new(file_key: impl Into<String>, node_id: Option<String>) -> Self {
        Self {
            file_key: file_key.into(),
            node_id,
        }
    }

    /// Parses links such as
    /// `https://www.figma.com/design/abc123/Name?node-id=381-150`.
    pub fn parse(input: &str) -> FetchResult<Self> {
        let url = Url::parse(input.trim())
            .map_err(|e| FetchError::invalid_location(input, format!("not a URL ({})", e)))?;

        let host = url.host_str().unwrap_or_default();
        if host != "figma.com" && !host.ends_with(".figma.com") {
            return Err(FetchError::invalid_location(input, "not a figma.com link"));
        }

        let mut segments = url.path_segments().into_iter().flatten();
        let route = segments.next().unwrap_or_default();
        if !FILE_ROUTES.contains(&route) {
            return Err(FetchError::invalid_location(
                input,
                format!("expected /file/, /design/ or /proto/ path, found `/{}`", route),
            ));
        }

        let file_key = segments.next().unwrap_or_default();
        if file_key.is_empty() {
            return Err(FetchError::invalid_location(input, "missing file key"));
        }

        let node_id = url
            .query_pairs()
            .find(|(k, _)| k == "node-id")
            .map(|(_, v)| to_api_node_id(&v))
            .filter(|id| !id.is_empty());

        Ok(Self::new(file_key, node_id))
    }
}

impl std::fmt::Display for FigmaLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.node_id {
            Some(node) => write!(f, "{} (node {})", self.file_key, node),
            None => write!(f, "{}", self.file_key),
        }
    }
}

/// Links spell node ids with dashes, the REST API with colons.
pub fn to_api_node_id(link_id: &str) -> String {
    link_id.trim().replace('-', ":")
}
