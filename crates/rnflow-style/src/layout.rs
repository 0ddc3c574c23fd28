//! Position, size and flex resolution.
//!
//! Everything here is relative to the node's parent. The selected root is
//! special: it is always laid out relative at the origin.

use rnflow_core::math::{round, unrotate_origin, Point};
use rnflow_core::{
    ConstraintType, CounterAxisAlign, LayoutAlign, LayoutMode, LayoutPositioning, LayoutSizing,
    LayoutWrap, NodeId, NodeKind, PrimaryAxisAlign, SceneNode, SceneTree, StyleMap, StyleValue,
};
use tracing::warn;

/// CSS `position` of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionMode {
    Relative,
    Absolute,
}

impl PositionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionMode::Relative => "relative",
            PositionMode::Absolute => "absolute",
        }
    }
}

/// Resolved edge offsets and size. `None` means the property is absent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxEdges {
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Parent-relative layout queries for nodes of one tree and selection.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext<'a> {
    pub tree: &'a SceneTree,
    pub root: NodeId,
}

impl<'a> LayoutContext<'a> {
    pub fn new(tree: &'a SceneTree, root: NodeId) -> Self {
        Self { tree, root }
    }

    pub fn is_root(&self, node: &SceneNode) -> bool {
        node.id == self.root
    }

    /// The parent, unless `node` is the selected root.
    fn parent(&self, node: &SceneNode) -> Option<&'a SceneNode> {
        if self.is_root(node) {
            None
        } else {
            self.tree.parent(node.id)
        }
    }

    /// True when the parent lays its children out with auto-layout.
    pub fn is_auto_layout_child(&self, node: &SceneNode) -> bool {
        self.parent(node)
            .is_some_and(|p| p.kind.is_container() && p.layout_mode != LayoutMode::None)
    }

    pub fn position_mode(&self, node: &SceneNode) -> PositionMode {
        if self.is_root(node) {
            return PositionMode::Relative;
        }
        if !self.is_auto_layout_child(node) {
            return PositionMode::Absolute;
        }
        match node.layout_positioning {
            LayoutPositioning::Auto => PositionMode::Relative,
            LayoutPositioning::Absolute => PositionMode::Absolute,
        }
    }

    /// `alignSelf`, `auto` outside auto-layout.
    pub fn align_self(&self, node: &SceneNode) -> &'static str {
        if !self.is_auto_layout_child(node) {
            return "auto";
        }
        match node.layout_align {
            LayoutAlign::Min => "flex-start",
            LayoutAlign::Center => "center",
            LayoutAlign::Max => "flex-end",
            LayoutAlign::Stretch => "stretch",
            LayoutAlign::Inherit => "auto",
        }
    }

    /// `(flexGrow, flexShrink, flexBasis)`.
    pub fn flex_values(&self, node: &SceneNode) -> (f64, f64, StyleValue) {
        if self.is_auto_layout_child(node) && node.layout_grow != 0.0 {
            (1.0, 1.0, StyleValue::Number(0.0))
        } else {
            (0.0, 0.0, StyleValue::from("auto"))
        }
    }

    /// Insert `position`, `alignSelf` and the flex triple.
    pub fn insert_parent_relative(&self, node: &SceneNode, style: &mut StyleMap) {
        let (grow, shrink, basis) = self.flex_values(node);
        style.insert("position", self.position_mode(node).as_str());
        style.insert("alignSelf", self.align_self(node));
        style.insert("flexGrow", grow);
        style.insert("flexShrink", shrink);
        style.insert("flexBasis", basis);
    }

    /// Resolve edge offsets and size against the parent.
    pub fn resolve_box(&self, node: &SceneNode) -> BoxEdges {
        let width = (node.layout_sizing_horizontal == LayoutSizing::Fixed).then(|| round(node.width, 0));
        let height = (node.layout_sizing_vertical == LayoutSizing::Fixed).then(|| round(node.height, 0));

        if self.is_root(node) || self.position_mode(node) == PositionMode::Relative {
            return BoxEdges {
                top: Some(0.0),
                left: Some(0.0),
                width,
                height,
                ..BoxEdges::default()
            };
        }

        let parent = self.parent(node);
        let (parent_width, parent_height) = parent.map_or((0.0, 0.0), |p| (p.width, p.height));

        let origin = unrotate_origin(Point::new(node.x, node.y), node.width, node.height, node.rotation);
        let top = round(origin.y, 0);
        let left = round(origin.x, 0);
        let bottom = round(parent_height - (origin.y + node.height), 0);
        let right = round(parent_width - (origin.x + node.width), 0);

        let parent_is_group = parent.is_some_and(|p| p.kind == NodeKind::Group);
        let (horizontal, vertical) = if node.kind.is_group_like() || parent_is_group {
            (ConstraintType::Min, ConstraintType::Min)
        } else {
            let c = node.constraints();
            (c.horizontal, c.vertical)
        };

        let mut edges = BoxEdges::default();
        (edges.top, edges.bottom, edges.height) = select_edges(vertical, top, bottom, height, node, "vertical");
        (edges.left, edges.right, edges.width) = select_edges(horizontal, left, right, width, node, "horizontal");

        if let Some(group) = parent.filter(|_| parent_is_group) {
            let (outer_width, outer_height) = self
                .tree
                .parent(group.id)
                .map_or((0.0, 0.0), |gp| (gp.width, gp.height));
            edges.top = edges.top.map(|v| v - group.y);
            edges.bottom = edges.bottom.map(|v| v - (outer_height - (group.y + group.height)));
            edges.left = edges.left.map(|v| v - group.x);
            edges.right = edges.right.map(|v| v - (outer_width - (group.x + group.width)));
        }

        edges
    }

    /// Insert the box keys in `top, bottom, height, left, right, width` order.
    pub fn insert_box_vertical_first(&self, edges: &BoxEdges, style: &mut StyleMap) {
        style.set("top", edges.top);
        style.set("bottom", edges.bottom);
        style.set("height", edges.height);
        style.set("left", edges.left);
        style.set("right", edges.right);
        style.set("width", edges.width);
    }

    /// Insert the box keys in `top, right, bottom, left, width, height` order.
    pub fn insert_box_clockwise(&self, edges: &BoxEdges, style: &mut StyleMap) {
        style.set("top", edges.top);
        style.set("right", edges.right);
        style.set("bottom", edges.bottom);
        style.set("left", edges.left);
        style.set("width", edges.width);
        style.set("height", edges.height);
    }
}

/// Pick near offset, far offset and size for one axis.
fn select_edges(
    constraint: ConstraintType,
    near: f64,
    far: f64,
    size: Option<f64>,
    node: &SceneNode,
    axis: &str,
) -> (Option<f64>, Option<f64>, Option<f64>) {
    match constraint {
        ConstraintType::Min => (Some(near), None, size),
        ConstraintType::Max => (None, Some(far), size),
        ConstraintType::Stretch => (Some(near), Some(far), None),
        ConstraintType::Center | ConstraintType::Scale => {
            warn!(
                node = %node.name,
                axis,
                constraint = ?constraint,
                "constraint is not supported, anchoring to the far edge"
            );
            (None, Some(far), size)
        }
    }
}

/// `transform` for a rotated node.
pub fn transform(node: &SceneNode) -> Option<StyleValue> {
    if node.rotation == 0.0 {
        return None;
    }
    let rotate = StyleMap::new().with("rotateZ", format!("{:.2}deg", -node.rotation));
    Some(StyleValue::List(vec![StyleValue::Object(rotate)]))
}

/// Insert the flex-container keys of an auto-layout capable node.
pub fn insert_container(node: &SceneNode, style: &mut StyleMap) {
    let row = node.layout_mode == LayoutMode::Horizontal;
    style.insert("display", "flex");
    style.insert("flexDirection", if row { "row" } else { "column" });
    style.insert(
        "flexWrap",
        match node.layout_wrap {
            LayoutWrap::Wrap => "wrap",
            LayoutWrap::NoWrap => "nowrap",
        },
    );
    style.insert(
        "alignItems",
        match node.counter_axis_align_items {
            CounterAxisAlign::Min => "flex-start",
            CounterAxisAlign::Max => "flex-end",
            CounterAxisAlign::Center => "center",
            CounterAxisAlign::Baseline => "baseline",
        },
    );
    style.insert(
        "justifyContent",
        match node.primary_axis_align_items {
            PrimaryAxisAlign::Min => "flex-start",
            PrimaryAxisAlign::Max => "flex-end",
            PrimaryAxisAlign::Center => "center",
            PrimaryAxisAlign::SpaceBetween => "space-between",
        },
    );
    if node.layout_mode != LayoutMode::None {
        style.insert(if row { "columnGap" } else { "rowGap" }, node.item_spacing);
    }
}

/// Insert the four padding keys.
pub fn insert_padding(node: &SceneNode, style: &mut StyleMap) {
    style.insert("paddingTop", node.padding_top);
    style.insert("paddingBottom", node.padding_bottom);
    style.insert("paddingLeft", node.padding_left);
    style.insert("paddingRight", node.padding_right);
}
