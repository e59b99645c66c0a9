#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request failed with status {0}: {1}")]
    HttpStatus(reqwest::StatusCode, String),

    #[error("{0}")]
    Other(String),
}
