use serde::{Deserialize, Serialize};

/// A single person in the org chart.
///
/// The chart is a strict three-level tree: one `Manager` at the root, `Lead`
/// nodes directly beneath it, and `Member` leaves beneath each lead. A node
/// exclusively owns its `children`; nothing is shared between parents.
///
/// The serialized form is the persisted document format, so field names and
/// the optional `expanded` flag must stay wire-compatible with exported files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgNode {
    pub id: String,
    pub name: String,
    pub role: NodeRole,
    /// Presentation hint only. Absent means "expanded".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
    #[serde(default)]
    pub children: Vec<OrgNode>,
}

impl OrgNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: NodeRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            expanded: None,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<OrgNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = Some(expanded);
        self
    }

    /// Effective expansion state. Only an explicit `false` collapses a node.
    pub fn is_expanded(&self) -> bool {
        self.expanded != Some(false)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Ids of every node in the subtree, in depth-first pre-order.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            ids.push(node.id.as_str());
            stack.extend(node.children.iter().rev());
        }
        ids
    }
}

/// Position of a node in the chart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NodeRole {
    Manager,
    Lead,
    Member,
}

impl NodeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => "Manager",
            Self::Lead => "Lead",
            Self::Member => "Member",
        }
    }

    /// The only role allowed directly beneath a node of this role.
    pub fn child_role(&self) -> Option<NodeRole> {
        match self {
            Self::Manager => Some(Self::Lead),
            Self::Lead => Some(Self::Member),
            Self::Member => None,
        }
    }
}

/// Shallow field merge applied by `update_node`. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePatch {
    pub name: Option<String>,
    pub role: Option<NodeRole>,
    pub expanded: Option<bool>,
    pub children: Option<Vec<OrgNode>>,
}

impl NodePatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn expanded(expanded: bool) -> Self {
        Self {
            expanded: Some(expanded),
            ..Self::default()
        }
    }

    pub fn children(children: Vec<OrgNode>) -> Self {
        Self {
            children: Some(children),
            ..Self::default()
        }
    }

    pub fn apply(self, node: &mut OrgNode) {
        if let Some(name) = self.name {
            node.name = name;
        }
        if let Some(role) = self.role {
            node.role = role;
        }
        if let Some(expanded) = self.expanded {
            node.expanded = Some(expanded);
        }
        if let Some(children) = self.children {
            node.children = children;
        }
    }
}

/// Direction for reordering a node among its siblings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Input carrying a display name (rename, add lead, add member).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameInput {
    pub name: String,
}

/// Input for explicitly expanding or collapsing a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetExpandedInput {
    pub expanded: bool,
}

/// Input for shifting a node among its siblings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderInput {
    pub direction: MoveDirection,
}

/// Input for dropping a member onto another lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveMemberInput {
    pub target_lead_id: String,
}
