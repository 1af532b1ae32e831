//! Error conversion helpers for file boundary operations
//!
//! Provides extension traits for cleaner error handling with path context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Report a failed read of the game source.
    ///
    /// # Example
    /// ```ignore
    /// fs.read_to_string(path).source_context(path)?;
    /// ```
    fn source_context(self, path: &Path) -> ApplicationResult<T>;

    /// Report a failed write of the game destination.
    fn destination_context(self, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn source_context(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })
    }

    fn destination_context(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::DestinationUnavailable {
            path: path.to_path_buf(),
            source,
        })
    }
}
