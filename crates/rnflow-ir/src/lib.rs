//! Intermediate representation for rnflow.
//!
//! The IR sits between the design tool's scene graph and emitted source.
//! [`IrBuilder`] lowers a selection into an [`IrNode`] tree with simplified
//! styles and code-friendly names; [`uniquify`] then makes every name unique
//! so it can double as a stylesheet key.

pub mod builder;
pub mod names;
pub mod node;
pub mod uniquify;

pub use builder::IrBuilder;
pub use names::CodeNames;
pub use node::{ImageFillMode, IrKind, IrNode};
pub use uniquify::uniquify;
