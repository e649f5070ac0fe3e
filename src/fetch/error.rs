use thiserror::Error;

/// Failures that stop a document from reaching the compressor.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid Figma location `{input}`: {reason}")]
    InvalidLocation { input: String, reason: String },

    #[error("a Figma access token is required to fetch {0}; pass --token or set FIGMA_TOKEN")]
    MissingToken(String),

    #[error("Figma rejected the access token (HTTP {status}); check --token or FIGMA_TOKEN")]
    Unauthorized { status: u16 },

    #[error("Figma file or node not found: {url}")]
    NotFound { url: String },

    #[error("Figma API error: HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request to Figma failed after {attempts} attempt(s): {reason}")]
    Transport { attempts: u32, reason: String },

    #[error("could not decode document: {0}")]
    Decode(String),

    #[error("could not find document node in response")]
    MissingDocument,

    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub fn invalid_location(input: &str, reason: impl Into<String>) -> Self {
        FetchError::InvalidLocation {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by what the user typed rather than by the
    /// network or the account.
    pub fn is_location_error(&self) -> bool {
        matches!(
            self,
            FetchError::InvalidLocation { .. } | FetchError::NotFound { .. }
        )
    }
}

pub type FetchResult<T> = Result<T, FetchError>;
