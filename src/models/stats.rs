use serde::{Deserialize, Serialize};

use super::OrgNode;

/// Headcount summary of the chart.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HierarchyStats {
    pub total_leads: usize,
    pub total_members: usize,
    /// One entry per lead, in chart order.
    pub team_sizes: Vec<TeamSize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamSize {
    /// The lead's first name.
    pub name: String,
    pub count: usize,
}

impl HierarchyStats {
    pub fn from_tree(root: &OrgNode) -> Self {
        let team_sizes: Vec<TeamSize> = root
            .children
            .iter()
            .map(|lead| TeamSize {
                name: lead
                    .name
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_string(),
                count: lead.children.len(),
            })
            .collect();

        Self {
            total_leads: root.children.len(),
            total_members: team_sizes.iter().map(|t| t.count).sum(),
            team_sizes,
        }
    }
}
