use thiserror::Error;

/// Failures at the HR API fetch boundary. The aggregation engine itself is
/// total over its inputs and never produces these; only the client does.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}
