//! Error types surfaced by the library.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::canvas::CanvasError;

/// Failure while generating or delivering a document.
#[derive(Debug, Error)]
pub enum GuideError {
    /// A drawing primitive rejected an operation.
    #[error("failed to render document")]
    Render(#[from] CanvasError),

    /// The finished artifact could not be written.
    #[error("failed to save {}", path.display())]
    Save {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Another document is still being generated.
    #[error("a document is already being generated")]
    Busy,

    /// Application state could not be persisted.
    #[error("failed to persist application state")]
    Store(#[from] StoreError),

    /// The outline could not be added to the rendered bytes.
    #[cfg(feature = "bookmarks")]
    #[error("failed to add bookmarks")]
    Bookmarks(#[from] crate::bookmarks::BookmarkError),
}

/// Failure of a [`KeyValueStore`](crate::store::KeyValueStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("state file {} is not accessible", path.display())]
    Io {
        /// Backing file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A value could not be encoded for storage.
    #[error("failed to encode the value stored under '{key}'")]
    Encode {
        /// Store key being written.
        key: String,
        /// Serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// The backing file does not hold a JSON object of strings.
    #[error("state file {} is not valid JSON", path.display())]
    Json {
        /// Backing file.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: serde_json::Error,
    },
}
