//! Per-kind style resolution.

use std::cell::RefCell;

use rnflow_assets::AssetStores;
use rnflow_core::{
    CompileError, DesignSource, Fills, ImagePaint, NodeId, NodeKind, Paint, Result, SceneNode,
    SceneTree, StyleMap,
};
use tracing::{debug, warn};

use crate::layout::{self, LayoutContext};
use crate::paint;
use crate::text;

/// Computes raw style records for the nodes of one selection.
///
/// Fonts and media touched while resolving are recorded in `assets`. The
/// borrow is never held across an await.
pub struct StyleResolver<'a, S> {
    layout: LayoutContext<'a>,
    source: &'a S,
    assets: &'a RefCell<AssetStores>,
}

impl<'a, S: DesignSource> StyleResolver<'a, S> {
    pub fn new(tree: &'a SceneTree, root: NodeId, source: &'a S, assets: &'a RefCell<AssetStores>) -> Self {
        Self {
            layout: LayoutContext::new(tree, root),
            source,
            assets,
        }
    }

    pub fn tree(&self) -> &'a SceneTree {
        self.layout.tree
    }

    pub fn root(&self) -> NodeId {
        self.layout.root
    }

    pub fn source(&self) -> &'a S {
        self.source
    }

    fn node(&self, id: NodeId) -> Result<&'a SceneNode> {
        self.layout
            .tree
            .get(id)
            .ok_or_else(|| CompileError::UnknownNode(id.to_string()))
    }

    /// Raw style record of `id`, before simplification.
    pub async fn resolve(&self, id: NodeId) -> Result<StyleMap> {
        let node = self.node(id)?;
        let ctx = &self.layout;
        let mut style = StyleMap::new();

        match &node.kind {
            NodeKind::Frame | NodeKind::Component | NodeKind::Instance => {
                ctx.insert_parent_relative(node, &mut style);
                ctx.insert_box_vertical_first(&ctx.resolve_box(node), &mut style);
                style.set("transform", layout::transform(node));
                layout::insert_padding(node, &mut style);
                paint::insert_borders(node, &mut style);
                style.insert("background", self.background(node).await?);
                style.set("boxShadow", paint::box_shadow(node));
                layout::insert_container(node, &mut style);
            }
            NodeKind::Group => {
                ctx.insert_parent_relative(node, &mut style);
                ctx.insert_box_vertical_first(&ctx.resolve_box(node), &mut style);
                style.set("transform", layout::transform(node));
            }
            NodeKind::Rectangle => {
                ctx.insert_parent_relative(node, &mut style);
                ctx.insert_box_clockwise(&ctx.resolve_box(node), &mut style);
                style.set("transform", layout::transform(node));
                paint::insert_borders(node, &mut style);
                style.insert("background", self.background(node).await?);
                style.set("boxShadow", paint::box_shadow(node));
            }
            NodeKind::Text => {
                ctx.insert_parent_relative(node, &mut style);
                ctx.insert_box_clockwise(&ctx.resolve_box(node), &mut style);
                style.set("transform", layout::transform(node));
                let typography = text::base_style(node, &mut self.assets.borrow_mut());
                for (key, value) in typography.iter() {
                    style.insert(key, value.clone());
                }
                paint::insert_text_shadow(node, &mut style);
            }
            kind if kind.is_vector_like() => {
                // Rotation is baked into the exported vector, so no transform.
                ctx.insert_parent_relative(node, &mut style);
                let mut edges = ctx.resolve_box(node);
                let min_width = (edges.width == Some(0.0)).then_some(0.001);
                let min_height = (edges.height == Some(0.0)).then_some(0.001);
                edges.width = edges.width.filter(|w| *w != 0.0);
                edges.height = edges.height.filter(|h| *h != 0.0);
                ctx.insert_box_clockwise(&edges, &mut style);
                style.set("minWidth", min_width);
                style.set("minHeight", min_height);
                style.insert("overflow", "visible");
            }
            NodeKind::ComponentSet => {
                return Err(CompileError::ComponentSetInNode { name: node.name.clone() });
            }
            kind => return Err(CompileError::InvalidNodeType { kind: kind.clone() }),
        }

        Ok(style)
    }

    /// Inner markup of a text node.
    pub fn text_markup(&self, id: NodeId) -> Result<String> {
        let node = self.node(id)?;
        Ok(text::rich_text_markup(node, &mut self.assets.borrow_mut()))
    }

    /// Filename of the topmost visible image fill that has been stored.
    pub fn background_image(&self, id: NodeId) -> Result<Option<String>> {
        let node = self.node(id)?;
        let Fills::Paints(paints) = &node.fills else {
            return Ok(None);
        };
        let assets = self.assets.borrow();
        Ok(paints.iter().rev().filter(|p| p.is_visible()).find_map(|p| match p {
            Paint::Image(ImagePaint { image_hash: Some(hash), .. }) => {
                assets.media.get(hash).map(|record| record.filename.clone())
            }
            _ => None,
        }))
    }

    /// CSS `background` for the node's fills.
    async fn background(&self, node: &SceneNode) -> Result<String> {
        let paints = match &node.fills {
            Fills::Paints(paints) => paints,
            Fills::Mixed => {
                return Err(CompileError::DataInconsistency(format!(
                    "mixed fills on {} node '{}'",
                    node.kind, node.name
                )))
            }
        };

        let visible: Vec<&Paint> = paints.iter().filter(|p| p.is_visible()).collect();
        if visible.is_empty() {
            return Ok("transparent".to_string());
        }

        let mut layers = Vec::with_capacity(visible.len());
        for paint in visible.into_iter().rev() {
            let layer = match paint {
                Paint::Image(image) => self.image_layer(node, image).await,
                other => paint::paint_layer(other),
            };
            layers.push(layer);
        }
        Ok(layers.join(", "))
    }

    /// `url('<file>')` for an image fill, fetching its bytes on first use.
    /// Any failure degrades this layer to `transparent`.
    async fn image_layer(&self, node: &SceneNode, image: &ImagePaint) -> String {
        let Some(hash) = image.image_hash.as_deref() else {
            return "transparent".to_string();
        };

        let stored = self.assets.borrow().media.get(hash).map(|r| r.filename.clone());
        if let Some(filename) = stored {
            return format!("url('{filename}')");
        }

        let bytes = match self.source.image_bytes(hash).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(node = %node.name, %hash, "image not found");
                return "transparent".to_string();
            }
            Err(err) => {
                warn!(node = %node.name, %hash, error = %err, "image fetch failed");
                return "transparent".to_string();
            }
        };

        let mut assets = self.assets.borrow_mut();
        match assets.media.store(hash, bytes) {
            Ok(record) => format!("url('{}')", record.filename),
            Err(err) => {
                warn!(node = %node.name, %hash, error = %err, "image layer dropped");
                "transparent".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rnflow_core::{
        ConstraintType, Effect, FontName, LayoutMode, Rgb, Rgba, ShadowEffect, SourceError,
        StrokeWeight, TextContent, TextRun,
    };

    const PNG: &[u8] = &[0x89, 0x50, 0x4e, 0x47, 0, 0, 0, 0];

    /// Serves PNG bytes for hash "png", junk for "junk", nothing otherwise.
    struct ImageSource;

    impl DesignSource for ImageSource {
        async fn export_svg(&self, node: NodeId) -> std::result::Result<String, SourceError> {
            Err(SourceError::ExportUnavailable(node.to_string()))
        }

        async fn image_bytes(&self, hash: &str) -> std::result::Result<Option<Vec<u8>>, SourceError> {
            Ok(match hash {
                "png" => Some(PNG.to_vec()),
                "junk" => Some(vec![1, 2, 3]),
                _ => None,
            })
        }
    }

    fn resolve(tree: &SceneTree, root: NodeId, id: NodeId, assets: &RefCell<AssetStores>) -> Result<StyleMap> {
        let resolver = StyleResolver::new(tree, root, &ImageSource, assets);
        pollster::block_on(resolver.resolve(id))
    }

    fn card() -> (SceneTree, NodeId) {
        let mut tree = SceneTree::new();
        let root = tree.add_root(SceneNode::new(NodeKind::Frame, "Card").with_bounds(40.0, 40.0, 100.0, 50.0));
        (tree, root)
    }

    #[test]
    fn test_frame_key_order() {
        let (tree, root) = card();
        let assets = RefCell::new(AssetStores::new());
        let style = resolve(&tree, root, root, &assets).unwrap();
        let keys: Vec<_> = style.keys().collect();
        assert_eq!(&keys[..5], &["position", "alignSelf", "flexGrow", "flexShrink", "flexBasis"]);
        assert_eq!(&keys[5..9], &["top", "height", "left", "width"]);
        assert_eq!(style.get_str("background"), Some("transparent"));
        assert_eq!(keys.last(), Some(&"justifyContent"));
    }

    #[test]
    fn test_background_reverses_stack() {
        let (mut tree, root) = card();
        let child = tree.add_child(
            root,
            SceneNode::new(NodeKind::Rectangle, "bg").with_fills(vec![
                Paint::solid(Rgb::new(1.0, 0.0, 0.0), 1.0),
                Paint::solid(Rgb::new(0.0, 0.0, 1.0), 1.0),
            ]),
        );
        let assets = RefCell::new(AssetStores::new());
        let style = resolve(&tree, root, child, &assets).unwrap();
        assert_eq!(
            style.get_str("background"),
            Some(
                "linear-gradient(rgba(0, 0, 255, 1), rgba(0, 0, 255, 1)), \
                 linear-gradient(rgba(255, 0, 0, 1), rgba(255, 0, 0, 1))"
            )
        );
    }

    #[test]
    fn test_image_fill_is_stored_once() {
        let (mut tree, root) = card();
        let a = tree.add_child(root, SceneNode::new(NodeKind::Rectangle, "a").with_fills(vec![Paint::image("png")]));
        let b = tree.add_child(root, SceneNode::new(NodeKind::Rectangle, "b").with_fills(vec![Paint::image("png")]));
        let assets = RefCell::new(AssetStores::new());

        let style = resolve(&tree, root, a, &assets).unwrap();
        assert_eq!(style.get_str("background"), Some("url('png.png')"));
        resolve(&tree, root, b, &assets).unwrap();
        assert_eq!(assets.borrow().media.len(), 1);

        let resolver = StyleResolver::new(&tree, root, &ImageSource, &assets);
        assert_eq!(resolver.background_image(a).unwrap().as_deref(), Some("png.png"));
    }

    #[test]
    fn test_unknown_image_degrades_layer() {
        let (mut tree, root) = card();
        let child = tree.add_child(
            root,
            SceneNode::new(NodeKind::Rectangle, "r")
                .with_fills(vec![Paint::solid(Rgb::new(0.0, 0.0, 0.0), 1.0), Paint::image("junk")]),
        );
        let assets = RefCell::new(AssetStores::new());
        let style = resolve(&tree, root, child, &assets).unwrap();
        assert_eq!(
            style.get_str("background"),
            Some("transparent, linear-gradient(rgba(0, 0, 0, 1), rgba(0, 0, 0, 1))")
        );
        assert!(assets.borrow().media.is_empty());
    }

    #[test]
    fn test_mixed_fills_outside_text_is_fatal() {
        let (mut tree, root) = card();
        let child = tree.add_child(root, SceneNode::new(NodeKind::Rectangle, "r").with_mixed_fills());
        let assets = RefCell::new(AssetStores::new());
        let err = resolve(&tree, root, child, &assets).unwrap_err();
        assert_eq!(err.code(), "DATA_INCONSISTENCY");
    }

    #[test]
    fn test_rectangle_borders_and_shadow() {
        let (mut tree, root) = card();
        let child = tree.add_child(
            root,
            SceneNode::new(NodeKind::Rectangle, "r")
                .with_bounds(10.0, 10.0, 20.0, 20.0)
                .with_strokes(vec![Paint::solid(Rgb::new(0.0, 0.0, 0.0), 1.0)], StrokeWeight::Uniform(2.0))
                .with_effects(vec![Effect::DropShadow(ShadowEffect::new(Rgba::BLACK, 0.0, 2.0, 4.0, 0.0))]),
        );
        let assets = RefCell::new(AssetStores::new());
        let style = resolve(&tree, root, child, &assets).unwrap();
        assert_eq!(style.get_number("borderLeftWidth"), Some(2.0));
        assert_eq!(style.get_str("boxShadow"), Some("0px 2px 4px 0px rgba(0, 0, 0, 1)"));
        assert_eq!(style.get_str("position"), Some("absolute"));
    }

    #[test]
    fn test_vector_sizing() {
        let (mut tree, root) = card();
        let line = tree.add_child(
            root,
            SceneNode::new(NodeKind::Line, "line")
                .with_bounds(0.0, 10.0, 80.0, 0.0)
                .with_rotation(30.0)
                .with_constraints(ConstraintType::Min, ConstraintType::Min),
        );
        let assets = RefCell::new(AssetStores::new());
        let style = resolve(&tree, root, line, &assets).unwrap();
        assert!(!style.contains_key("height"));
        assert_eq!(style.get_number("minHeight"), Some(0.001));
        assert!(!style.contains_key("minWidth"));
        assert_eq!(style.get_str("overflow"), Some("visible"));
        assert!(!style.contains_key("transform"));
    }

    #[test]
    fn test_text_style_and_font_registration() {
        let (mut tree, root) = card();
        let text = tree.add_child(
            root,
            SceneNode::new(NodeKind::Text, "title")
                .with_fills(vec![Paint::solid(Rgb::new(0.0, 0.0, 0.0), 1.0)])
                .with_text(TextContent::new(
                    "Title",
                    vec![TextRun::new(0, 5, FontName::new("Brand Sans", "Bold"), 20.0)],
                )),
        );
        let assets = RefCell::new(AssetStores::new());
        let style = resolve(&tree, root, text, &assets).unwrap();
        assert_eq!(style.get_str("fontFamily"), Some("Brand Sans"));
        assert_eq!(style.get_number("fontSize"), Some(20.0));
        assert!(style.index_of("textAlign") > style.index_of("height"));
        assert_eq!(assets.borrow().fonts.len(), 1);
    }

    #[test]
    fn test_auto_layout_container() {
        let mut tree = SceneTree::new();
        let root = tree.add_root(
            SceneNode::new(NodeKind::Frame, "row")
                .with_auto_layout(LayoutMode::Horizontal, 4.0)
                .with_padding(8.0, 8.0, 8.0, 8.0),
        );
        let assets = RefCell::new(AssetStores::new());
        let style = resolve(&tree, root, root, &assets).unwrap();
        assert_eq!(style.get_str("flexDirection"), Some("row"));
        assert_eq!(style.get_number("columnGap"), Some(4.0));
        assert_eq!(style.get_number("paddingTop"), Some(8.0));
    }

    #[test]
    fn test_rejected_kinds() {
        let mut tree = SceneTree::new();
        let set = tree.add_root(SceneNode::new(NodeKind::ComponentSet, "Buttons"));
        let slice = tree.add_child(set, SceneNode::new(NodeKind::Other("SLICE".into()), "slice"));
        let assets = RefCell::new(AssetStores::new());
        assert_eq!(resolve(&tree, set, set, &assets).unwrap_err().code(), "COMPONENT_SET_IN_THE_NODE");
        assert_eq!(resolve(&tree, set, slice, &assets).unwrap_err().code(), "INVALID_NODE_TYPE");
        assert_eq!(resolve(&tree, set, NodeId(99), &assets).unwrap_err().code(), "UNKNOWN_NODE");
    }
}
