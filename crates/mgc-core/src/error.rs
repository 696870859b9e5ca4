use thiserror::Error;

#[derive(Error, Debug)]
pub enum MgcError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    #[error("Failed to allocate {0}")]
    AllocationFailure(String),

    #[error("Unknown image: {0}")]
    UnknownImage(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MgcError>;
