//! Pure structural operations over an org tree.
//!
//! Every mutation takes the current root by reference and returns a new root.
//! Lookups that miss are never errors here: the mutation simply returns a
//! tree equal to its input. Role-nesting rules are enforced one layer up in
//! [`super::engine`].
//!
//! Traversals use an explicit work list rather than recursion so nothing
//! depends on the fixed depth of the Manager → Lead → Member schema.

use crate::models::{NodePatch, OrgNode};

/// Depth-first search, self before children, left to right.
pub fn find_node<'a>(root: &'a OrgNode, id: &str) -> Option<&'a OrgNode> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.id == id {
            return Some(node);
        }
        stack.extend(node.children.iter().rev());
    }
    None
}

/// Parent of the node with `id`. `None` when `id` is the root or absent.
pub fn find_parent<'a>(root: &'a OrgNode, id: &str) -> Option<&'a OrgNode> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.children.iter().any(|child| child.id == id) {
            return Some(node);
        }
        stack.extend(node.children.iter().rev());
    }
    None
}

/// Mutable counterpart of [`find_node`], with the same visiting order.
fn find_node_mut<'a>(root: &'a mut OrgNode, id: &str) -> Option<&'a mut OrgNode> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.id == id {
            return Some(node);
        }
        stack.extend(node.children.iter_mut().rev());
    }
    None
}

/// Merge `patch` into the first node matching `id`.
pub fn update_node(root: &OrgNode, id: &str, patch: NodePatch) -> OrgNode {
    let mut next = root.clone();
    if let Some(node) = find_node_mut(&mut next, id) {
        patch.apply(node);
    }
    next
}

/// Append `new_node` as the last child of `parent_id`.
pub fn add_node(root: &OrgNode, parent_id: &str, new_node: OrgNode) -> OrgNode {
    let mut next = root.clone();
    if let Some(parent) = find_node_mut(&mut next, parent_id) {
        parent.children.push(new_node);
    }
    next
}

/// Remove every descendant matching `id`, along with its subtree.
///
/// Only children are filtered, so passing the root's own id is a no-op.
pub fn remove_node(root: &OrgNode, id: &str) -> OrgNode {
    let mut next = root.clone();
    {
        let mut stack = vec![&mut next];
        while let Some(node) = stack.pop() {
            node.children.retain(|child| child.id != id);
            stack.extend(node.children.iter_mut());
        }
    }
    next
}

/// Relocate `node_id` to become the last child of `target_id`.
///
/// No-op when the node, its parent, or the target is missing. The target is
/// checked before removal so the node can never be dropped on the floor.
pub fn move_node(root: &OrgNode, node_id: &str, target_id: &str) -> OrgNode {
    let (Some(_), Some(node)) = (find_parent(root, node_id), find_node(root, node_id)) else {
        return root.clone();
    };
    if find_node(node, target_id).is_some() {
        // Target lives inside the moved subtree; moving would detach it.
        return root.clone();
    }
    let node = node.clone();
    let next = remove_node(root, node_id);
    if find_node(&next, target_id).is_none() {
        return root.clone();
    }
    add_node(&next, target_id, node)
}
