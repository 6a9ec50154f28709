//! Error types for the ticket export pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the export pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to rasterize the ticket view
    #[error("Rasterization failed: {0}")]
    RasterError(String),

    /// Failed to encode the raster as a lossless image
    #[error("Image encoding failed: {0}")]
    EncodeError(String),

    /// Failed to load a ticket asset (QR code, logo)
    #[error("Asset load failed: {0}")]
    AssetError(String),

    /// Failed to compose the PDF document
    #[error("PDF composition failed: {0}")]
    ComposeError(String),

    /// Failed to hand the finished document to the sink
    #[error("Save failed: {0}")]
    SaveError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Network error while fetching a remote asset
    #[cfg(feature = "remote-assets")]
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::SaveError(err.to_string())
    }
}
