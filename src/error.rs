use thiserror::Error;

/// Failures that end a search invocation.
///
/// Malformed item fields and unparseable auction end times never show up
/// here; the filter pipeline recovers those per item.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("authentication failed: {0}")]
    AuthFailure(String),
    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid search parameters: {0}")]
    InvalidParameters(String),
    #[error("fixture unavailable: {0:#}")]
    Fixture(#[source] anyhow::Error),
}

pub type SearchResult<T> = std::result::Result<T, SearchError>;
