//! Error types for `FlashTag`.
//!
//! Query operations on a [`TagIndex`](crate::TagIndex) are total and never
//! return these errors: missing tags and empty results are valid answers.
//! Errors only surface at the edges, when snapshots are read or written and
//! when configuration is loaded.

use thiserror::Error;

/// Result type alias for `FlashTag` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in `FlashTag` operations.
///
/// Error codes follow the pattern `FLASH-XXX` for easy debugging.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error (FLASH-001).
    #[error("[FLASH-001] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot corrupted (FLASH-002).
    ///
    /// The snapshot file failed validation and must be rebuilt.
    #[error("[FLASH-002] Snapshot corrupted: {0}")]
    SnapshotCorrupted(String),

    /// Snapshot written by an unknown format version (FLASH-003).
    #[error("[FLASH-003] Unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version this build reads and writes.
        expected: u8,
        /// Version found in the file header.
        found: u8,
    },

    /// Configuration error (FLASH-004).
    #[error("[FLASH-004] Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the error code (e.g., "FLASH-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "FLASH-001",
            Self::SnapshotCorrupted(_) => "FLASH-002",
            Self::UnsupportedVersion { .. } => "FLASH-003",
            Self::Config(_) => "FLASH-004",
        }
    }

    /// Returns true if this error is recoverable.
    ///
    /// A corrupted snapshot has to be rebuilt from source data.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::SnapshotCorrupted(_))
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
