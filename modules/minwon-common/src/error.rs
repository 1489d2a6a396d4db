use thiserror::Error;

#[derive(Error, Debug)]
pub enum MinwonError {
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),
}
