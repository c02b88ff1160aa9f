//! Error types for the steganography engine.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding, decoding or configuring the engine.
#[derive(Error, Debug)]
pub enum Error {
    /// Message does not fit in the image with the current options.
    #[error("Message too large. Max: {max} bytes, Got: {requested} bytes")]
    CapacityExceeded { max: usize, requested: usize },

    /// Magic header mismatch: the image carries no payload, or it was
    /// written with different options (or password).
    #[error("No hidden data found or invalid format")]
    NoHiddenData,

    /// Header length field is zero or larger than the image can hold.
    #[error("Invalid data length: {length} (usable capacity is {max} bytes)")]
    InvalidLength { length: u32, max: usize },

    /// Extracted payload could not be parsed.
    #[error("Invalid payload format: {0}")]
    InvalidPayload(String),

    /// Engine options failed validation.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Pixel data length does not match `width * height * 4`.
    #[error("Invalid pixel buffer: {width}x{height} needs {expected} bytes, got {actual}")]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Filename does not fit the 2-byte length prefix of a packed file.
    #[error("Filename too long: {0} bytes (max 65535)")]
    FilenameTooLong(usize),

    /// I/O error while reading an options file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
