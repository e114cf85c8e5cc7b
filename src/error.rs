use reqwest::StatusCode;
use thiserror::Error;

/// Failure at the network boundary. Always surfaced to the caller.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("GET {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url}: request failed with HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("GET {url}: response is not valid json: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("GET {url}: unexpected response shape: {reason}")]
    Shape { url: String, reason: String },
}

impl TransportError {
    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T, E = TransportError> = std::result::Result<T, E>;

/// Replace the value of any `api_key` query parameter so URLs can be logged.
pub(crate) fn redact(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let query = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some(("api_key", _)) => "api_key=REDACTED".to_string(),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", base, query)
}
