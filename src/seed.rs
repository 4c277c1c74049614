//! Built-in chart used when the store holds no document yet.

use crate::models::{NodeRole, OrgNode};

pub const ROOT_ID: &str = "root-manager";

const TEAMS: &[(&str, &[&str])] = &[
    (
        "Priya Raman",
        &["Leo Okafor", "Mei Tanaka", "Jonas Berg", "Ana Souza"],
    ),
    ("Omar Haddad", &["Sam Whitaker", "Ines Duarte", "Kofi Mensah"]),
    ("Hannah Kowalski", &["Ravi Iyer", "Lucia Romero"]),
    ("Tomás Ferreira", &[]),
];

pub fn default_tree() -> OrgNode {
    let leads = TEAMS
        .iter()
        .enumerate()
        .map(|(lead_idx, (lead, members))| {
            let members = members
                .iter()
                .enumerate()
                .map(|(member_idx, name)| {
                    OrgNode::new(
                        format!("member-{}-{}", lead_idx + 1, member_idx + 1),
                        *name,
                        NodeRole::Member,
                    )
                })
                .collect();
            OrgNode::new(format!("lead-{}", lead_idx + 1), *lead, NodeRole::Lead)
                .with_expanded(true)
                .with_children(members)
        })
        .collect();

    OrgNode::new(ROOT_ID, "Dana Whitfield", NodeRole::Manager).with_children(leads)
}
