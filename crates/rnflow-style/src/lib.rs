//! Style resolution for rnflow.
//!
//! [`StyleResolver`] turns one scene node into a raw style record: position
//! and size against its parent, flex participation, paint, borders, shadows
//! and typography. [`simplify`] folds that record into its canonical minimal
//! form.

pub mod layout;
pub mod paint;
pub mod resolver;
pub mod simplify;
pub mod text;

pub use layout::{BoxEdges, LayoutContext, PositionMode};
pub use resolver::StyleResolver;
pub use simplify::simplify;
