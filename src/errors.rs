/*!
 * Error types for the txml-importer library.
 *
 * Encoding resolution is the only stage of an import that fails hard, so
 * `EncodingError` is the error most callers see. `ImportError` wraps it
 * together with the failures of the collaborators that acquire bytes.
 */

use thiserror::Error;

/// Encodings an importer accepts, in the spelling used for labels
pub const SUPPORTED_ENCODINGS: [&str; 3] = ["UTF-8", "UTF-16LE", "UTF-16BE"];

/// Errors raised while resolving the encoding of a TXML file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// Neither detection nor an in-file declaration produced an encoding
    #[error("Encoding type could not be determined. Please set an encoding of UTF-8, UTF-16LE, or UTF-16BE")]
    Unknown,

    /// An encoding was determined but it is not one we can import
    #[error("Encoding type not supported: {0}. Please choose an encoding of UTF-8, UTF-16LE, or UTF-16BE")]
    Unsupported(String),
}

impl EncodingError {
    /// Check a resolved label against the supported set
    pub fn check_supported(label: &str) -> Result<(), EncodingError> {
        if SUPPORTED_ENCODINGS.contains(&label) {
            Ok(())
        } else {
            Err(EncodingError::Unsupported(label.to_string()))
        }
    }
}

/// Main error type for importing a TXML file from a location
#[derive(Error, Debug)]
pub enum ImportError {
    /// Error from encoding resolution
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error fetching a remote file
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for ImportError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for ImportError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<reqwest::Error> for ImportError {
    fn from(error: reqwest::Error) -> Self {
        Self::Fetch(error.to_string())
    }
}
