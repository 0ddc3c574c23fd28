//! IR node types.

use indexmap::IndexMap;
use rnflow_core::StyleMap;
use serde::{Deserialize, Serialize};

/// Kind-specific payload of an IR node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IrKind {
    #[serde(rename_all = "camelCase")]
    Component {
        props: IndexMap<String, String>,
        background_image: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Instance {
        main_component_name: String,
        props: IndexMap<String, String>,
        background_image: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Frame { background_image: Option<String> },
    #[serde(rename_all = "camelCase")]
    Rectangle { background_image: Option<String> },
    Group,
    #[serde(rename_all = "camelCase")]
    Text { markup: String, max_lines: Option<u32> },
    Vector { svg: String },
    /// Renders nothing. Stands in for a subtree that failed to export.
    Blank,
}

/// A node of the intermediate tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrNode {
    pub name: String,
    #[serde(flatten)]
    pub kind: IrKind,
    pub style: StyleMap,
    pub children: Vec<IrNode>,
}

impl IrNode {
    pub fn new(name: impl Into<String>, kind: IrKind, style: StyleMap) -> Self {
        Self {
            name: name.into(),
            kind,
            style,
            children: Vec::new(),
        }
    }

    /// A blank placeholder with no style and no children.
    pub fn blank(name: impl Into<String>) -> Self {
        Self::new(name, IrKind::Blank, StyleMap::new())
    }

    pub fn with_children(mut self, children: Vec<IrNode>) -> Self {
        self.children = children;
        self
    }

    pub fn is_blank(&self) -> bool {
        matches!(self.kind, IrKind::Blank)
    }

    /// Background image filename of container kinds.
    pub fn background_image(&self) -> Option<&str> {
        match &self.kind {
            IrKind::Component { background_image, .. }
            | IrKind::Instance { background_image, .. }
            | IrKind::Frame { background_image }
            | IrKind::Rectangle { background_image } => background_image.as_deref(),
            _ => None,
        }
    }

    /// Visit this node and its descendants, pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a IrNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Number of nodes in this subtree.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(IrNode::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// How image fills are attached to containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageFillMode {
    /// Image fills become `url(...)` layers of the CSS background.
    #[default]
    Css,
    /// Also attach the topmost image fill as the container's image source.
    ImageBackground,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_pre_order() {
        let tree = IrNode::new("a", IrKind::Group, StyleMap::new()).with_children(vec![
            IrNode::new("b", IrKind::Group, StyleMap::new())
                .with_children(vec![IrNode::blank("c")]),
            IrNode::new("d", IrKind::Frame { background_image: None }, StyleMap::new()),
        ]);
        let mut names = Vec::new();
        tree.walk(&mut |node| names.push(node.name.as_str()));
        assert_eq!(names, vec!["a", "b", "c", "d"]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_serialize_tags_kind() {
        let node = IrNode::new(
            "title",
            IrKind::Text { markup: "{`Hi`}".into(), max_lines: Some(2) },
            StyleMap::new().with("fontSize", 12.0),
        );
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "TEXT");
        assert_eq!(json["maxLines"], 2);
        assert_eq!(json["style"]["fontSize"], 12);
    }

    #[test]
    fn test_image_fill_mode_from_json() {
        let mode: ImageFillMode = serde_json::from_str(r#""imageBackground""#).unwrap();
        assert_eq!(mode, ImageFillMode::ImageBackground);
    }
}
