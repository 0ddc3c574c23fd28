//! Lowering of a scene selection into the IR.

use futures::future::{try_join_all, FutureExt, LocalBoxFuture};
use rnflow_core::{CompileError, DesignSource, NodeId, NodeKind, Result, SceneNode, StyleMap};
use rnflow_style::{simplify, StyleResolver};
use tracing::{debug, warn};

use crate::names::CodeNames;
use crate::node::{ImageFillMode, IrKind, IrNode};

/// Walks a selection top-down and builds its IR tree.
///
/// Every node's style is resolved and simplified before its children are
/// lowered. Sibling subtrees are lowered concurrently and joined in paint
/// order.
pub struct IrBuilder<'a, S> {
    resolver: StyleResolver<'a, S>,
    names: &'a CodeNames,
    image_fills: ImageFillMode,
}

impl<'a, S: DesignSource> IrBuilder<'a, S> {
    pub fn new(resolver: StyleResolver<'a, S>, names: &'a CodeNames) -> Self {
        Self {
            resolver,
            names,
            image_fills: ImageFillMode::default(),
        }
    }

    pub fn with_image_fills(mut self, mode: ImageFillMode) -> Self {
        self.image_fills = mode;
        self
    }

    /// Lower the resolver's root.
    ///
    /// Only frames, rectangles, groups, components and instances can be the
    /// root of a compiled module.
    pub async fn build(&self) -> Result<IrNode> {
        let root = self.resolver.root();
        let node = self.node(root)?;
        match &node.kind {
            NodeKind::Frame | NodeKind::Rectangle | NodeKind::Group | NodeKind::Component | NodeKind::Instance => {}
            NodeKind::ComponentSet => {
                return Err(CompileError::ComponentSetInNode { name: node.name.clone() });
            }
            kind => return Err(CompileError::UnsupportedRoot { kind: kind.clone() }),
        }
        self.lower(root).await
    }

    fn node(&self, id: NodeId) -> Result<&'a SceneNode> {
        self.resolver
            .tree()
            .get(id)
            .ok_or_else(|| CompileError::UnknownNode(id.to_string()))
    }

    fn lower(&self, id: NodeId) -> LocalBoxFuture<'_, Result<IrNode>> {
        async move {
            let node = self.node(id)?;
            let style = simplify(&self.resolver.resolve(id).await?);
            let name = self.names.code_friendly(&node.name);

            let ir = match &node.kind {
                kind if kind.is_vector_like() => self.export(node, name, style).await,
                NodeKind::Group if self.is_collapsible(id) => {
                    debug!(node = %node.name, "collapsing vector group");
                    self.export(node, name, style).await
                }
                NodeKind::Group => IrNode::new(name, IrKind::Group, style).with_children(self.children(id).await?),
                NodeKind::Frame => {
                    let kind = IrKind::Frame {
                        background_image: self.background_image(id)?,
                    };
                    IrNode::new(name, kind, style).with_children(self.children(id).await?)
                }
                NodeKind::Rectangle => {
                    let kind = IrKind::Rectangle {
                        background_image: self.background_image(id)?,
                    };
                    IrNode::new(name, kind, style)
                }
                NodeKind::Component => {
                    let kind = IrKind::Component {
                        props: self.names.props(node.variant_properties.as_ref()),
                        background_image: self.background_image(id)?,
                    };
                    IrNode::new(self.component_name(node), kind, style).with_children(self.children(id).await?)
                }
                NodeKind::Instance => {
                    let main = node.main_component.as_ref();
                    let kind = IrKind::Instance {
                        main_component_name: main
                            .map(|m| self.names.code_friendly(m.variant_set_name.as_deref().unwrap_or(&m.name)))
                            .unwrap_or_default(),
                        props: self.names.props(main.and_then(|m| m.variant_properties.as_ref())),
                        background_image: self.background_image(id)?,
                    };
                    IrNode::new(name, kind, style).with_children(self.children(id).await?)
                }
                NodeKind::Text => {
                    let kind = IrKind::Text {
                        markup: self.resolver.text_markup(id)?,
                        max_lines: node.text.as_ref().and_then(|t| t.max_lines),
                    };
                    IrNode::new(name, kind, style)
                }
                NodeKind::ComponentSet => {
                    return Err(CompileError::ComponentSetInNode { name: node.name.clone() });
                }
                kind => return Err(CompileError::InvalidNodeType { kind: kind.clone() }),
            };
            Ok(ir)
        }
        .boxed_local()
    }

    /// Visible children of `id`, lowered concurrently, in paint order.
    async fn children(&self, id: NodeId) -> Result<Vec<IrNode>> {
        let pending = self
            .resolver
            .tree()
            .children(id)
            .filter(|child| child.visible)
            .map(|child| self.lower(child.id));
        try_join_all(pending).await
    }

    /// A group collapses when everything under it can be drawn as one vector.
    /// Hidden children count too: they are part of the export.
    fn is_collapsible(&self, id: NodeId) -> bool {
        self.resolver.tree().children(id).all(|child| match &child.kind {
            kind if kind.is_vector_like() => true,
            NodeKind::Rectangle => !child.has_image_fill(),
            NodeKind::Group => self.is_collapsible(child.id),
            _ => false,
        })
    }

    /// Export `node` as a vector, or a blank when the design tool refuses.
    async fn export(&self, node: &SceneNode, name: String, mut style: StyleMap) -> IrNode {
        match self.resolver.source().export_svg(node.id).await {
            Ok(svg) => {
                style.remove("transform");
                IrNode::new(name, IrKind::Vector { svg }, style)
            }
            Err(err) => {
                warn!(node = %node.name, error = %err, "vector export failed, emitting blank");
                IrNode::blank(name)
            }
        }
    }

    /// Variants are named after their variant set.
    fn component_name(&self, node: &SceneNode) -> String {
        let owner = self
            .resolver
            .tree()
            .parent(node.id)
            .filter(|parent| parent.kind == NodeKind::ComponentSet);
        self.names.code_friendly(owner.map_or(&node.name, |set| &set.name))
    }

    fn background_image(&self, id: NodeId) -> Result<Option<String>> {
        match self.image_fills {
            ImageFillMode::Css => Ok(None),
            ImageFillMode::ImageBackground => self.resolver.background_image(id),
        }
    }
}
