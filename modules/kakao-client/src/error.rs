use thiserror::Error;

pub type Result<T> = std::result::Result<T, KakaoError>;

#[derive(Debug, Error)]
pub enum KakaoError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for KakaoError {
    fn from(err: reqwest::Error) -> Self {
        KakaoError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for KakaoError {
    fn from(err: serde_json::Error) -> Self {
        KakaoError::Parse(err.to_string())
    }
}
