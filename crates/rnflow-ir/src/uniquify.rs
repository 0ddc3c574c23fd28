//! Name uniquification.

use std::collections::HashSet;

use crate::node::IrNode;

/// Rename nodes in pre-order so that no two non-blank nodes share a name.
///
/// A colliding name is prefixed with `_` until it is free. Blank nodes are
/// neither renamed nor recorded.
pub fn uniquify(root: &mut IrNode) {
    let mut taken = HashSet::new();
    visit(root, &mut taken);
}

fn visit(node: &mut IrNode, taken: &mut HashSet<String>) {
    if !node.is_blank() {
        while taken.contains(&node.name) {
            node.name.insert(0, '_');
        }
        taken.insert(node.name.clone());
    }
    for child in &mut node.children {
        visit(child, taken);
    }
}
