//! JSON scene snapshots.
//!
//! A snapshot is a design-tool selection captured to disk: the node tree in
//! the design tool's own vocabulary, pre-exported SVG for the nodes that can
//! be drawn as vectors, and the image fills as base64.
//!
//! ```json
//! {
//!   "images": { "3f2a...": "data:image/png;base64,iVBORw0..." },
//!   "nodes": [
//!     { "type": "FRAME", "id": "1:2", "name": "Card", "width": 100, "height": 50,
//!       "children": [ { "type": "STAR", "name": "icon", "svg": "<svg ...>" } ] }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use base64::Engine;
use rnflow_core::{DesignSource, NodeId, SceneNode, SceneTree, SourceError};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, SnapshotError};

#[derive(Deserialize)]
struct SnapshotDoc {
    #[serde(default)]
    images: HashMap<String, String>,
    #[serde(default)]
    nodes: Vec<NodeSpec>,
}

#[derive(Deserialize)]
struct NodeSpec {
    #[serde(flatten)]
    node: SceneNode,
    #[serde(default)]
    children: Vec<NodeSpec>,
    #[serde(default)]
    svg: Option<String>,
}

/// A captured scene that also answers the compiler's export and image
/// requests.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    tree: SceneTree,
    svgs: HashMap<NodeId, String>,
    images: HashMap<String, Vec<u8>>,
}

impl Snapshot {
    pub fn new(tree: SceneTree) -> Self {
        Self {
            tree,
            ..Self::default()
        }
    }

    /// Parse a snapshot document.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: SnapshotDoc = serde_json::from_str(json)?;

        let mut snapshot = Snapshot::default();
        for spec in doc.nodes {
            snapshot.insert(None, spec);
        }
        for (hash, encoded) in doc.images {
            let bytes = decode_image(&encoded).map_err(|source| SnapshotError::Image {
                hash: hash.clone(),
                source,
            })?;
            snapshot.images.insert(hash, bytes);
        }

        debug!(
            nodes = snapshot.tree.len(),
            vectors = snapshot.svgs.len(),
            images = snapshot.images.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Read and parse a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn insert(&mut self, parent: Option<NodeId>, spec: NodeSpec) {
        let NodeSpec { node, children, svg } = spec;
        let id = match parent {
            Some(parent) => self.tree.add_child(parent, node),
            None => self.tree.add_root(node),
        };
        if let Some(svg) = svg {
            self.svgs.insert(id, svg);
        }
        for child in children {
            self.insert(Some(id), child);
        }
    }

    pub fn with_svg(mut self, node: NodeId, svg: impl Into<String>) -> Self {
        self.svgs.insert(node, svg.into());
        self
    }

    pub fn with_image(mut self, hash: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.images.insert(hash.into(), bytes);
        self
    }

    pub fn tree(&self) -> &SceneTree {
        &self.tree
    }

    /// The node with design-tool id `key`, or the first root.
    pub fn root(&self, key: Option<&str>) -> Result<NodeId> {
        match key {
            Some(key) => self
                .tree
                .find_by_key(key)
                .ok_or_else(|| SnapshotError::UnknownRoot(key.to_string())),
            None => self.tree.roots().first().copied().ok_or(SnapshotError::Empty),
        }
    }
}

/// Plain base64 or a `data:<mime>;base64,<data>` URI.
fn decode_image(encoded: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    let data = match encoded.strip_prefix("data:") {
        Some(uri) => uri.split_once(',').map_or(uri, |(_, data)| data),
        None => encoded,
    };
    base64::engine::general_purpose::STANDARD.decode(data.trim())
}

impl DesignSource for Snapshot {
    async fn export_svg(&self, node: NodeId) -> std::result::Result<String, SourceError> {
        self.svgs
            .get(&node)
            .cloned()
            .ok_or_else(|| SourceError::ExportUnavailable(node.to_string()))
    }

    async fn image_bytes(&self, hash: &str) -> std::result::Result<Option<Vec<u8>>, SourceError> {
        Ok(self.images.get(hash).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rnflow_core::{Fills, LayoutMode, NodeKind, Paint};
    use std::io::Write;

    const CARD: &str = r#"{
        "images": {
            "abc": "iVBORw0KGgo=",
            "def": "data:image/png;base64,iVBORw0KGgo="
        },
        "nodes": [
            {
                "type": "FRAME",
                "id": "1:2",
                "name": "Card",
                "width": 100,
                "height": 50,
                "layoutMode": "VERTICAL",
                "itemSpacing": 8,
                "fills": [{ "type": "IMAGE", "imageHash": "abc" }],
                "children": [
                    { "type": "RECTANGLE", "id": "1:3", "name": "bg", "width": 100, "height": 50,
                      "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 1, "b": 1 } }] },
                    { "type": "STAR", "id": "1:4", "name": "icon", "svg": "<svg width=\"10\"></svg>" },
                    { "type": "TEXT", "id": "1:5", "name": "title", "visible": false, "fills": "MIXED",
                      "text": { "characters": "Hi", "runs": [
                          { "start": 0, "end": 2, "fontName": { "family": "Inter", "style": "Bold" }, "fontSize": 16 }
                      ] } }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_tree() {
        let snapshot = Snapshot::from_json(CARD).unwrap();
        let tree = snapshot.tree();
        assert_eq!(tree.len(), 4);

        let root = snapshot.root(None).unwrap();
        let card = tree.get(root).unwrap();
        assert_eq!(card.kind, NodeKind::Frame);
        assert_eq!(card.layout_mode, LayoutMode::Vertical);
        assert_eq!(card.item_spacing, 8.0);
        assert!(matches!(&card.fills, Fills::Paints(p) if matches!(p[0], Paint::Image(_))));

        let names: Vec<_> = tree.children(root).map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["bg", "icon", "title"]);

        let title = tree.get(snapshot.root(Some("1:5")).unwrap()).unwrap();
        assert!(!title.visible);
        assert_eq!(title.fills, Fills::Mixed);
        assert_eq!(title.text.as_ref().unwrap().runs[0].font_weight, 400);
    }

    #[test]
    fn test_source_answers_from_snapshot() {
        let snapshot = Snapshot::from_json(CARD).unwrap();
        let icon = snapshot.root(Some("1:4")).unwrap();
        let bg = snapshot.root(Some("1:3")).unwrap();

        let svg = pollster::block_on(snapshot.export_svg(icon)).unwrap();
        assert_eq!(svg, "<svg width=\"10\"></svg>");
        assert!(pollster::block_on(snapshot.export_svg(bg)).is_err());

        let png = pollster::block_on(snapshot.image_bytes("abc")).unwrap().unwrap();
        assert_eq!(&png[..4], &[0x89, 0x50, 0x4e, 0x47]);
        assert_eq!(pollster::block_on(snapshot.image_bytes("def")).unwrap(), Some(png));
        assert_eq!(pollster::block_on(snapshot.image_bytes("nope")).unwrap(), None);
    }

    #[test]
    fn test_root_lookup_errors() {
        let snapshot = Snapshot::from_json(CARD).unwrap();
        assert!(matches!(snapshot.root(Some("9:9")), Err(SnapshotError::UnknownRoot(_))));

        let empty = Snapshot::from_json("{}").unwrap();
        assert!(matches!(empty.root(None), Err(SnapshotError::Empty)));
    }

    #[test]
    fn test_bad_image_is_reported() {
        let err = Snapshot::from_json(r#"{"images": {"bad": "***"}}"#).unwrap_err();
        assert!(matches!(err, SnapshotError::Image { ref hash, .. } if hash == "bad"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CARD.as_bytes()).unwrap();
        let snapshot = Snapshot::load(file.path()).unwrap();
        assert_eq!(snapshot.tree().len(), 4);

        let missing = Snapshot::load(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(SnapshotError::Io(_))));
    }
}
