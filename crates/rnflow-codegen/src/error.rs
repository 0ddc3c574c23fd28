//! Error types for module generation.

use rnflow_core::CompileError;
use thiserror::Error;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur while compiling a selection into a module.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// The selection could not be lowered.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Template rendering error.
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Invalid template.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// A built-in pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Invalid options document.
    #[error("Invalid options: {0}")]
    Options(#[from] serde_json::Error),
}

impl CodegenError {
    /// The message to show the designer.
    pub fn user_message(&self) -> String {
        match self {
            CodegenError::Compile(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}
