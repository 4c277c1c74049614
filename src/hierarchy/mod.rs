//! The hierarchy data engine.
//!
//! - [`tree`]: structural edits with no domain knowledge.
//! - [`engine`]: the gated, validated operations the application issues.
//! - [`validate`]: full structural check used on import and load.

pub mod engine;
pub mod tree;

use std::collections::HashSet;

use crate::error::{OrgError, OrgResult};
use crate::models::{NodeRole, OrgNode};

/// Check every structural invariant of a chart.
///
/// The root must be a `Manager`, each node's children must carry the role
/// one level below it, `Member` nodes are leaves, names are non-empty and
/// ids are unique across the whole tree.
pub fn validate(root: &OrgNode) -> OrgResult<()> {
    if root.role != NodeRole::Manager {
        return Err(OrgError::import_format(format!(
            "root role must be Manager, found {}",
            root.role.as_str()
        )));
    }

    let mut seen = HashSet::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if !seen.insert(node.id.as_str()) {
            return Err(OrgError::import_format(format!("duplicate id '{}'", node.id)));
        }
        if node.name.trim().is_empty() {
            return Err(OrgError::import_format(format!("node '{}' has an empty name", node.id)));
        }
        for child in &node.children {
            if Some(child.role) != node.role.child_role() {
                return Err(OrgError::import_format(format!(
                    "{} '{}' cannot be placed under {} '{}'",
                    child.role.as_str(),
                    child.name,
                    node.role.as_str(),
                    node.name
                )));
            }
        }
        stack.extend(node.children.iter());
    }
    Ok(())
}
