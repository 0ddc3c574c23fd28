//! The design-tool collaborator.

use crate::errors::SourceError;
use crate::scene::NodeId;

/// Services the compiler needs from the design tool beyond the scene graph.
///
/// Both calls may suspend. Implementations are driven from a single task;
/// the compiler never requires `Send` futures.
#[allow(async_fn_in_trait)]
pub trait DesignSource {
    /// Export the node as a standalone SVG document.
    async fn export_svg(&self, node: NodeId) -> Result<String, SourceError>;

    /// Raw bytes of the image identified by `hash`, or `None` if the design
    /// tool has no such image.
    async fn image_bytes(&self, hash: &str) -> Result<Option<Vec<u8>>, SourceError>;
}

/// A source with no export or image support. Every vector export fails and
/// every image lookup comes back empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSource;

impl DesignSource for NullSource {
    async fn export_svg(&self, node: NodeId) -> Result<String, SourceError> {
        Err(SourceError::ExportUnavailable(node.to_string()))
    }

    async fn image_bytes(&self, _hash: &str) -> Result<Option<Vec<u8>>, SourceError> {
        Ok(None)
    }
}
