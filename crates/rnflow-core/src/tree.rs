//! Arena-backed scene tree.
//!
//! Nodes are stored in insertion order and linked by [`NodeId`]. Parent and
//! child lookups are index operations, so the compiler can walk up to a
//! grandparent without holding references into the tree.

use crate::scene::{NodeId, SceneNode};

/// A scene graph: one or more roots and their descendants.
#[derive(Debug, Clone, Default)]
pub struct SceneTree {
    nodes: Vec<SceneNode>,
    roots: Vec<NodeId>,
}

impl SceneTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a top-level node and return its id.
    pub fn add_root(&mut self, mut node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.id = id;
        node.parent = None;
        node.children.clear();
        self.nodes.push(node);
        self.roots.push(id);
        id
    }

    /// Append `node` as the last child of `parent` and return its id.
    ///
    /// An unknown `parent` leaves the node detached.
    pub fn add_child(&mut self, parent: NodeId, mut node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.id = id;
        node.children.clear();
        node.parent = self.nodes.get(parent.0).map(|_| parent);
        self.nodes.push(node);
        if let Some(parent_node) = self.nodes.get_mut(parent.0) {
            parent_node.children.push(id);
        }
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0)
    }

    /// Top-level node ids in insertion order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn parent(&self, id: NodeId) -> Option<&SceneNode> {
        self.get(id)?.parent.and_then(|p| self.get(p))
    }

    /// Children of `id` in paint order (back to front).
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &SceneNode> + '_ {
        self.get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |child| self.get(*child))
    }

    /// `id` and all of its descendants, pre-order.
    pub fn descendants(&self, id: NodeId) -> Vec<&SceneNode> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.get(current) {
                out.push(node);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Find a node by the design tool's identifier.
    pub fn find_by_key(&self, key: &str) -> Option<NodeId> {
        self.nodes.iter().find(|node| node.key == key).map(|node| node.id)
    }

    /// Find the first node with the given display name, in insertion order.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().find(|node| node.name == name).map(|node| node.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NodeKind;

    fn sample() -> (SceneTree, NodeId, NodeId, NodeId) {
        let mut tree = SceneTree::new();
        let root = tree.add_root(SceneNode::new(NodeKind::Frame, "root").with_key("1:1"));
        let group = tree.add_child(root, SceneNode::new(NodeKind::Group, "group"));
        let leaf = tree.add_child(group, SceneNode::new(NodeKind::Rectangle, "leaf").with_key("1:3"));
        (tree, root, group, leaf)
    }

    #[test]
    fn test_links() {
        let (tree, root, group, leaf) = sample();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.roots(), &[root]);
        assert_eq!(tree.parent(leaf).map(|n| n.id), Some(group));
        assert!(tree.parent(root).is_none());
        assert_eq!(tree.children(root).map(|n| n.id).collect::<Vec<_>>(), vec![group]);
    }

    #[test]
    fn test_descendants_pre_order() {
        let (mut tree, root, group, leaf) = sample();
        let sibling = tree.add_child(root, SceneNode::new(NodeKind::Text, "sibling"));
        let order: Vec<_> = tree.descendants(root).iter().map(|n| n.id).collect();
        assert_eq!(order, vec![root, group, leaf, sibling]);
    }

    #[test]
    fn test_find() {
        let (tree, root, _, leaf) = sample();
        assert_eq!(tree.find_by_key("1:3"), Some(leaf));
        assert_eq!(tree.find_by_name("root"), Some(root));
        assert_eq!(tree.find_by_key("9:9"), None);
    }

    #[test]
    fn test_unknown_parent_leaves_node_detached() {
        let mut tree = SceneTree::new();
        let id = tree.add_child(NodeId(42), SceneNode::new(NodeKind::Frame, "orphan"));
        assert!(tree.get(id).is_some_and(|n| n.parent.is_none()));
    }
}
