//! Compilation options.

use std::path::PathBuf;

use rnflow_ir::ImageFillMode;
use serde::Deserialize;

use crate::error::Result;

/// Options for one compilation. Every field has a default, so `{}` is a
/// valid options document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// How image fills reach the markup.
    pub image_fills: ImageFillMode,
    /// Spaces per nesting level in the emitted module.
    pub indent: usize,
    /// Exported function name. Defaults to the capitalized root name.
    pub component_name: Option<String>,
    /// Hosted-font catalog in the web fonts API shape.
    pub hosted_fonts: Option<PathBuf>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            image_fills: ImageFillMode::Css,
            indent: 2,
            component_name: None,
            hosted_fonts: None,
        }
    }
}

impl CompileOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_image_fills(mut self, mode: ImageFillMode) -> Self {
        self.image_fills = mode;
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_component_name(mut self, name: impl Into<String>) -> Self {
        self.component_name = Some(name.into());
        self
    }

    pub fn with_hosted_fonts(mut self, path: impl Into<PathBuf>) -> Self {
        self.hosted_fonts = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(CompileOptions::from_json("{}").unwrap(), CompileOptions::default());
    }

    #[test]
    fn test_camel_case_fields() {
        let options = CompileOptions::from_json(
            r#"{"imageFills": "imageBackground", "indent": 4, "componentName": "Hero", "hostedFonts": "fonts.json"}"#,
        )
        .unwrap();
        assert_eq!(options.image_fills, ImageFillMode::ImageBackground);
        assert_eq!(options.indent, 4);
        assert_eq!(options.component_name.as_deref(), Some("Hero"));
        assert_eq!(options.hosted_fonts, Some(PathBuf::from("fonts.json")));
    }

    #[test]
    fn test_unknown_fill_mode_is_rejected() {
        assert!(CompileOptions::from_json(r#"{"imageFills": "tiles"}"#).is_err());
    }
}
