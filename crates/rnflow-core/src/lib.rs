//! Core types for the rnflow design-to-code compiler.
//!
//! This crate provides the foundational types used across the other rnflow crates:
//! - The design tool's scene graph and an arena tree to hold it
//! - The design-tool collaborator trait
//! - Style records and colors
//! - The geometry kernel
//! - Error types

pub mod color;
pub mod errors;
pub mod math;
pub mod scene;
pub mod source;
pub mod style;
pub mod tree;

pub use color::{CssRgba, Rgb, Rgba};
pub use errors::{CompileError, Result, SourceError};
pub use scene::*;
pub use source::{DesignSource, NullSource};
pub use style::{format_number, StyleMap, StyleValue};
pub use tree::SceneTree;
