use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single invocation.
///
/// The `Display` text of each variant is exactly what the caller sees in the
/// `{"error": ...}` body, so keep the messages stable.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// No credential was configured for the upstream service.
    #[error("Missing API key")]
    MissingApiKey,

    /// Neither a city nor a full coordinate pair was supplied.
    #[error("Please provide city or coordinates")]
    MissingLocation,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl HandlerError {
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::MissingApiKey => 500,
            HandlerError::MissingLocation => 400,
            HandlerError::Upstream(_) => 500,
        }
    }
}

/// Anything that went wrong while talking to the weather service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Invalid upstream URL: {0}")]
    Url(#[from] url::ParseError),

    /// Transport failure. The URL is stripped since it carries the credential.
    #[error("Upstream request failed: {0}")]
    Request(reqwest::Error),

    #[error("Upstream responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to decode upstream JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Request(err.without_url())
    }
}

impl UpstreamError {
    pub(crate) fn status(status: StatusCode, body: &str) -> Self {
        UpstreamError::Status { status, body: truncate_body(body) }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
