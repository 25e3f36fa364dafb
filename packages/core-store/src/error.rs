//! Error types shared by every kvtree layer.

use crate::path::PathError;

/// Errors surfaced by the projector, the client and the transports.
///
/// Decoding never appears here: a payload that is not structured text falls
/// back to a string value instead of failing.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Path validation error.
    #[error("path error: {0}")]
    Path(#[from] PathError),

    /// Invalid path for an operation.
    #[error("invalid path: {message}")]
    InvalidPath { message: String },

    /// A value could not be converted to or from a Rust type.
    #[error("conversion error: {message}")]
    Conversion { message: String },

    /// The transport refused a write part way through a bulk write.
    ///
    /// `written` entries were stored before the rejection and remain stored.
    #[error("write rejected at '{key}' after {written} entries were written")]
    WriteRejected { key: String, written: usize },

    /// The transport failed to carry out a request.
    #[error("transport error: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),

    /// Invalid configuration.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl Error {
    /// Wrap any transport-level error.
    pub fn transport(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Transport(Box::new(e))
    }

    /// Create a conversion error.
    pub fn conversion(message: impl Into<String>) -> Self {
        Error::Conversion {
            message: message.into(),
        }
    }
}
