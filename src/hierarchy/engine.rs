//! Domain rules layered over the tree algebra.
//!
//! Each operation checks the acting role, validates its inputs against the
//! Manager → Lead → Member nesting rules, and only then delegates to
//! [`super::tree`]. A rejected operation never returns a partially edited
//! tree.

use uuid::Uuid;

use super::tree;
use crate::error::{OrgError, OrgResult};
use crate::models::{MoveDirection, NodePatch, NodeRole, OrgNode, UserRole};

fn require_admin(actor: UserRole) -> OrgResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(OrgError::PermissionDenied)
    }
}

fn require_node<'a>(root: &'a OrgNode, id: &str) -> OrgResult<&'a OrgNode> {
    tree::find_node(root, id).ok_or_else(|| OrgError::NotFound(id.to_string()))
}

fn require_role(node: &OrgNode, role: NodeRole, action: &str) -> OrgResult<()> {
    if node.role == role {
        Ok(())
    } else {
        Err(OrgError::Validation(format!(
            "{} requires a {} target, but '{}' is a {}",
            action,
            role.as_str(),
            node.name,
            node.role.as_str()
        )))
    }
}

/// Reject names that are empty or only whitespace. Accepted names are kept
/// exactly as given.
fn require_name(name: &str) -> OrgResult<String> {
    if name.trim().is_empty() {
        return Err(OrgError::validation("name must not be empty"));
    }
    Ok(name.to_string())
}

/// Fresh id that does not collide with anything already in `root`.
pub fn generate_id(root: &OrgNode) -> String {
    loop {
        let id = Uuid::new_v4().simple().to_string();
        if tree::find_node(root, &id).is_none() {
            return id;
        }
    }
}

/// Replace the display name of `id`.
pub fn rename(actor: UserRole, root: &OrgNode, id: &str, new_name: &str) -> OrgResult<OrgNode> {
    require_admin(actor)?;
    let name = require_name(new_name)?;
    require_node(root, id)?;
    Ok(tree::update_node(root, id, NodePatch::name(name)))
}

/// Append a new, expanded lead under the manager `manager_id`.
pub fn add_lead(actor: UserRole, root: &OrgNode, manager_id: &str, name: &str) -> OrgResult<OrgNode> {
    require_admin(actor)?;
    let name = require_name(name)?;
    require_role(require_node(root, manager_id)?, NodeRole::Manager, "add lead")?;

    let lead = OrgNode::new(generate_id(root), name, NodeRole::Lead).with_expanded(true);
    Ok(tree::add_node(root, manager_id, lead))
}

/// Append a new member under the lead `lead_id`.
pub fn add_member(actor: UserRole, root: &OrgNode, lead_id: &str, name: &str) -> OrgResult<OrgNode> {
    require_admin(actor)?;
    let name = require_name(name)?;
    require_role(require_node(root, lead_id)?, NodeRole::Lead, "add member")?;

    let member = OrgNode::new(generate_id(root), name, NodeRole::Member);
    Ok(tree::add_node(root, lead_id, member))
}

/// Remove a node and its whole subtree. The root can never be deleted.
pub fn delete_node(actor: UserRole, root: &OrgNode, id: &str) -> OrgResult<OrgNode> {
    require_admin(actor)?;
    if root.id == id {
        return Err(OrgError::validation("the root manager cannot be deleted"));
    }
    require_node(root, id)?;
    Ok(tree::remove_node(root, id))
}

/// Flip whether `id` shows its children. Absent flags count as expanded.
pub fn toggle_expand(actor: UserRole, root: &OrgNode, id: &str) -> OrgResult<OrgNode> {
    require_admin(actor)?;
    let expanded = require_node(root, id)?.is_expanded();
    Ok(tree::update_node(root, id, NodePatch::expanded(!expanded)))
}

/// Set the expansion flag of `id` explicitly.
pub fn set_expanded(actor: UserRole, root: &OrgNode, id: &str, expanded: bool) -> OrgResult<OrgNode> {
    require_admin(actor)?;
    require_node(root, id)?;
    Ok(tree::update_node(root, id, NodePatch::expanded(expanded)))
}

/// Swap a node with its immediate neighbour.
///
/// Reordering the root, an absent node, the first node upward, or the last
/// node downward all return the tree unchanged.
pub fn reorder_sibling(
    actor: UserRole,
    root: &OrgNode,
    id: &str,
    direction: MoveDirection,
) -> OrgResult<OrgNode> {
    require_admin(actor)?;
    let Some(parent) = tree::find_parent(root, id) else {
        return Ok(root.clone());
    };
    let Some(index) = parent.children.iter().position(|c| c.id == id) else {
        return Ok(root.clone());
    };

    let neighbour = match direction {
        MoveDirection::Up if index > 0 => index - 1,
        MoveDirection::Down if index + 1 < parent.children.len() => index + 1,
        _ => return Ok(root.clone()),
    };
    let mut children = parent.children.clone();
    children.swap(index, neighbour);
    Ok(tree::update_node(root, &parent.id, NodePatch::children(children)))
}

/// Move a member under another lead and expand that lead.
pub fn move_member(
    actor: UserRole,
    root: &OrgNode,
    member_id: &str,
    target_lead_id: &str,
) -> OrgResult<OrgNode> {
    require_admin(actor)?;
    if member_id == target_lead_id {
        return Err(OrgError::validation("a node cannot be moved onto itself"));
    }
    let target = require_node(root, target_lead_id)?;
    require_role(target, NodeRole::Lead, "move member")?;
    require_role(require_node(root, member_id)?, NodeRole::Member, "move member")?;

    let moved = tree::move_node(root, member_id, target_lead_id);
    Ok(tree::update_node(&moved, target_lead_id, NodePatch::expanded(true)))
}
