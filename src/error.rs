//! Error types for variant generation

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    // ─────────────────────────────────────────────────────────────
    // Directories
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to read source directory {}: {source}", path.display())]
    ReadDir { path: PathBuf, source: io::Error },

    // ─────────────────────────────────────────────────────────────
    // Per-file processing
    // ─────────────────────────────────────────────────────────────
    #[error("No image encoder available for {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
        }
    }

    /// True for errors tied to a single source file rather than the whole run.
    pub const fn is_per_file(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat { .. }
                | Self::Read { .. }
                | Self::Decode { .. }
                | Self::Encode { .. }
                | Self::Write { .. }
        )
    }
}
