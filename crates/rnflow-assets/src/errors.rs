//! Error types for asset collection.

use thiserror::Error;

/// Errors while storing media.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MediaError {
    #[error("Unknown image type")]
    UnknownType { hash: String },
}

/// Errors while loading a hosted-font catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid hosted font catalog: {0}")]
    Json(#[from] serde_json::Error),
}
