//! Error type shared by buffers, conversions, resampling, codecs, and the
//! image facade.
use thiserror::Error;

/// Errors surfaced to callers. Nothing is retried internally.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImageError {
    /// Out-of-range coordinate, row, or channel, zero dimensions, or a
    /// parameter outside its documented range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Source slice length does not match the buffer shape.
    #[error("shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Unknown (layout, element kind) tuple, unrecognised encoder tag, or
    /// unknown codec name.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Corrupt or unrecognisable input data.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Underlying stream failure.
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// Operation attempted after the image was released.
    #[error("image has been released")]
    Disposed,
}
