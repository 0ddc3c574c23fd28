//! Error types shared across the rnflow pipeline.

use thiserror::Error;

use crate::scene::NodeKind;

/// Fatal compilation errors. Any of these aborts the whole compile.
///
/// `Display` renders as `CODE::detail`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// A variant set was reached while walking the selection.
    #[error("COMPONENT_SET_IN_THE_NODE::{name}")]
    ComponentSetInNode { name: String },

    /// A node kind the compiler does not know how to translate.
    #[error("INVALID_NODE_TYPE::{kind}")]
    InvalidNodeType { kind: NodeKind },

    /// The selected root cannot be compiled on its own.
    #[error("UNSUPPORTED_ROOT::{kind}")]
    UnsupportedRoot { kind: NodeKind },

    /// The scene reports values that contradict each other.
    #[error("DATA_INCONSISTENCY::{0}")]
    DataInconsistency(String),

    /// A node id that is not part of the scene.
    #[error("UNKNOWN_NODE::{0}")]
    UnknownNode(String),
}

impl CompileError {
    /// The bare error code.
    pub fn code(&self) -> &'static str {
        match self {
            CompileError::ComponentSetInNode { .. } => "COMPONENT_SET_IN_THE_NODE",
            CompileError::InvalidNodeType { .. } => "INVALID_NODE_TYPE",
            CompileError::UnsupportedRoot { .. } => "UNSUPPORTED_ROOT",
            CompileError::DataInconsistency(_) => "DATA_INCONSISTENCY",
            CompileError::UnknownNode(_) => "UNKNOWN_NODE",
        }
    }

    /// A short explanation suitable for showing to the designer.
    pub fn user_message(&self) -> String {
        match self {
            CompileError::ComponentSetInNode { .. } => {
                "A variant set cannot be converted. Select a single variant or an instance of it.".to_string()
            }
            CompileError::InvalidNodeType { .. } | CompileError::UnsupportedRoot { .. } => {
                "The selection cannot be converted. Select a frame, group, rectangle, component or instance.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Failures reported by the design tool.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    #[error("vector export is not available for node {0}")]
    ExportUnavailable(String),

    #[error("vector export failed for node {node}: {reason}")]
    ExportFailed { node: String, reason: String },

    #[error("failed to fetch image {hash}: {reason}")]
    ImageFetch { hash: String, reason: String },
}

/// Result type using CompileError.
pub type Result<T> = std::result::Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_code_prefix() {
        let err = CompileError::ComponentSetInNode { name: "Buttons".into() };
        assert_eq!(err.to_string(), "COMPONENT_SET_IN_THE_NODE::Buttons");
        assert_eq!(err.code(), "COMPONENT_SET_IN_THE_NODE");

        let err = CompileError::UnsupportedRoot { kind: NodeKind::Text };
        assert_eq!(err.to_string(), "UNSUPPORTED_ROOT::TEXT");
    }

    #[test]
    fn test_user_message() {
        let set = CompileError::ComponentSetInNode { name: "x".into() };
        assert!(set.user_message().contains("variant set"));

        let kind = CompileError::InvalidNodeType { kind: NodeKind::Other("SLICE".into()) };
        assert!(kind.user_message().contains("cannot be converted"));

        let other = CompileError::DataInconsistency("mixed fills".into());
        assert_eq!(other.user_message(), "DATA_INCONSISTENCY::mixed fills");
    }
}
