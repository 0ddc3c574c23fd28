//! Scene snapshot I/O for rnflow.
//!
//! [`Snapshot`] loads a design-tool selection captured as JSON and serves as
//! an offline [`DesignSource`](rnflow_core::DesignSource): vector exports
//! and image bytes come from the snapshot itself.

pub mod error;
pub mod snapshot;

pub use error::{Result, SnapshotError};
pub use snapshot::Snapshot;
