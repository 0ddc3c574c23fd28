//! Error types for rnflow-io.

use thiserror::Error;

/// Result type for snapshot operations.
pub type Result<T> = std::result::Result<T, SnapshotError>;

/// Errors that can occur while loading a scene snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// An embedded image could not be decoded.
    #[error("image {hash}: {source}")]
    Image {
        hash: String,
        #[source]
        source: base64::DecodeError,
    },

    /// The snapshot holds no nodes.
    #[error("snapshot has no root nodes")]
    Empty,

    /// No node has the requested design-tool id.
    #[error("no node with id {0}")]
    UnknownRoot(String),
}
