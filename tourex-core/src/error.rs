use thiserror::Error;

#[derive(Error, Debug)]
pub enum TourError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("Image processing failed: {0}")]
    ImageProcessing(String),

    #[error("Invalid image filename: {0}")]
    InvalidFilename(String),

    #[error("Tour not found: {0}")]
    NotFound(String),

    #[error("Tour update rejected: {0}")]
    UpdateFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, TourError>;
