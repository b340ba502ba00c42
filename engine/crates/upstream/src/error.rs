/// Failure of a single call to the Letterboxd API.
///
/// Cloneable: every caller awaiting the same in-flight request receives it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    /// The API answered with a non-2xx status.
    #[error("upstream responded with status {status}: {body}")]
    Status { status: u16, body: String },
    /// The request never produced a response (connection, TLS, timeout...).
    #[error("upstream request failed: {0}")]
    Transport(String),
    /// The response body was not the JSON we expected.
    #[error("upstream returned malformed JSON: {0}")]
    MalformedJson(String),
    /// The response was valid JSON, but lacked a field the endpoint always returns.
    #[error("upstream response is missing the `{0}` field")]
    MissingField(&'static str),
}

impl UpstreamError {
    pub(crate) fn transport(error: reqwest::Error) -> Self {
        UpstreamError::Transport(error.to_string())
    }

    pub(crate) fn malformed(error: serde_json::Error) -> Self {
        UpstreamError::MalformedJson(error.to_string())
    }

    /// The HTTP status, when the API did answer.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Problems found while building the client. These are startup errors, never per-request ones.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("the Letterboxd API key is missing or empty")]
    MissingApiKey,
    #[error("the Letterboxd API secret is missing or empty")]
    MissingApiSecret,
    #[error("`{0}` cannot be used as an API base URL")]
    InvalidBaseUrl(url::Url),
    #[error("building the HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
