//! Error types for icy_pad_core

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for document and configuration operations.
///
/// None of these are fatal: the front-end shows them as a notification and the
/// window keeps its previous state.
#[derive(Debug, Error)]
pub enum PadError {
    #[error("Cannot access file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File '{}' is not valid UTF-8 text", path.display())]
    Decode { path: PathBuf },

    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error("Invalid command table: {0}")]
    Commands(#[from] toml::de::Error),
}

/// Result type alias for icy_pad_core operations
pub type Result<T> = std::result::Result<T, PadError>;

impl PadError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn decode(path: impl Into<PathBuf>) -> Self {
        Self::Decode { path: path.into() }
    }

    /// The file this error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. } | Self::Decode { path } => Some(path),
            _ => None,
        }
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}
