use thiserror::Error;

pub type Result<T> = std::result::Result<T, InsightsError>;

#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {status} for {url}: {message} ({hint})")]
    Api {
        status: u16,
        url: String,
        message: String,
        hint: &'static str,
    },
    #[error("Contributor statistics for {0} are still being computed by the server, try again later")]
    StatsPending(String),
    #[error("Base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("Unexpected content encoding '{encoding}' for {path}")]
    UnexpectedEncoding { encoding: String, path: String },
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid repository '{0}', expected <owner>/<name>")]
    InvalidRepo(String),
    #[error("Unusable pagination link from {url}: {reason}")]
    Pagination { url: String, reason: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Repository {0} has no commits")]
    EmptyHistory(String),
}

impl InsightsError {
    pub(crate) fn api(status: u16, url: impl Into<String>, message: impl Into<String>) -> Self {
        let hint = match status {
            401 => "check your access token",
            403 => "check repository permissions or rate limits",
            404 => "repository or path not found or not accessible",
            409 => "repository is empty",
            _ => "check network connectivity and API status",
        };
        InsightsError::Api {
            status,
            url: url.into(),
            message: message.into(),
            hint,
        }
    }
}
