//! Error types for `WemForge`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `WemForge` operations.
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Decoder Errors ====================
    /// The configured decoder binary does not exist on disk.
    #[error("decoder binary not found at {path}")]
    DecoderNotFound {
        /// The path that was checked.
        path: PathBuf,
    },

    /// No decoder binary could be located anywhere.
    #[error("vgmstream-cli not found; install it or pass an explicit path")]
    DecoderUnavailable,

    /// A decode invocation failed (nonzero exit, spawn failure, or no output).
    #[error("decode failed for {input}: {stderr}")]
    DecodeFailed {
        /// The source file that failed to decode.
        input: PathBuf,
        /// Captured stderr from the decoder, or a local error description.
        stderr: String,
    },

    // ==================== File System Errors ====================
    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDir(String),
}

// Add conversion from walkdir::Error
impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDir(err.to_string())
    }
}

/// A specialized Result type for `WemForge` operations.
pub type Result<T> = std::result::Result<T, Error>;
