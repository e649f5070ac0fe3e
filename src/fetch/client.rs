//! Blocking Figma REST client with retry and exponential backoff.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use super::error::{FetchError, FetchResult};
use super::location::FigmaLocation;

pub const DEFAULT_API_BASE: &str = "https://api.figma.com/v1/";
const TOKEN_HEADER: &str = "X-Figma-Token";

/// Configuration for the HTTP transport layer.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL of the REST API, ending in a slash.
    pub api_base: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum number of retry attempts after the first request.
    pub max_retries: u32,
    /// Initial backoff duration (doubles each retry).
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
        }
    }
}

/// What to do with a non-success response.
#[derive(Debug, PartialEq, Eq)]
enum Verdict {
    Retry,
    Fail,
}

fn classify(status: StatusCode) -> Verdict {
    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        Verdict::Retry
    } else {
        Verdict::Fail
    }
}

fn status_error(status: StatusCode, url: &Url, body: String) -> FetchError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FetchError::Unauthorized {
            status: status.as_u16(),
        },
        StatusCode::NOT_FOUND => FetchError::NotFound {
            url: url.to_string(),
        },
        _ => FetchError::Status {
            status: status.as_u16(),
            body,
        },
    }
}

#[derive(Debug)]
pub struct FigmaClient {
    config: HttpClientConfig,
    token: String,
    http: reqwest::blocking::Client,
}

impl FigmaClient {
    pub fn new(token: impl Into<String>, config: HttpClientConfig) -> FetchResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .build()
            .map_err(|e| FetchError::Transport {
                attempts: 0,
                reason: e.to_string(),
            })?;
        Ok(Self {
            config,
            token: token.into(),
            http,
        })
    }

    /// Endpoint for a whole file, or for a single node when the location
    /// carries one.
    pub fn endpoint(&self, location: &FigmaLocation) -> FetchResult<Url> {
        let base = Url::parse(&self.config.api_base).map_err(|e| {
            FetchError::invalid_location(&self.config.api_base, format!("bad API base ({})", e))
        })?;
        let path = match &location.node_id {
            Some(_) => format!("files/{}/nodes", location.file_key),
            None => format!("files/{}", location.file_key),
        };
        let mut url = base
            .join(&path)
            .map_err(|e| FetchError::invalid_location(&location.file_key, e.to_string()))?;
        if let Some(node) = &location.node_id {
            url.query_pairs_mut().append_pair("ids", node);
        }
        Ok(url)
    }

    /// Fetches the raw API response for a location.
    pub fn fetch(&self, location: &FigmaLocation) -> FetchResult<Value> {
        let url = self.endpoint(location)?;
        tracing::debug!(%url, "fetching Figma document");

        let mut backoff = self.config.initial_backoff;
        let mut last_err = String::new();

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tracing::debug!(
                    "figma: retry attempt {}/{} after {:?}",
                    attempt,
                    self.config.max_retries,
                    backoff
                );
                std::thread::sleep(backoff);
                backoff = (backoff * 2).min(self.config.max_backoff);
            }

            let response = self
                .http
                .get(url.clone())
                .header(TOKEN_HEADER, &self.token)
                .send();

            match response {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        let body = resp.text().map_err(|e| FetchError::Decode(e.to_string()))?;
                        return super::decode_json(&body);
                    }
                    if classify(status) == Verdict::Fail {
                        let body = resp.text().unwrap_or_default();
                        return Err(status_error(status, &url, body));
                    }
                    last_err = format!("HTTP {}", status);
                }
                Err(e) => {
                    last_err = e.to_string();
                }
            }
            tracing::warn!(attempt, error = %last_err, "figma request failed");
        }

        Err(FetchError::Transport {
            attempts: self.config.max_retries + 1,
            reason: last_err,
        })
    }
}
