//! Error types for the scanning pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`ScanError`].
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors raised while scanning a tree of tools.
///
/// Only [`ScanError::RootNotFound`] and [`ScanError::RootNotDirectory`] abort a
/// whole scan. The others are recorded on the owning tool and the scan moves on.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The scan root does not exist.
    #[error("Base path not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// The scan root exists but is not a directory.
    #[error("Base path is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    /// A manifest file disappeared or was never there.
    #[error("Manifest not found: {}", .0.display())]
    ManifestNotFound(PathBuf),

    /// The manifest exists but could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid UTF-8.
    #[error("Failed to decode {} as UTF-8: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// The configuration file is present but invalid.
    #[error("Invalid config file {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}
