//! ASCII tree rendering for org charts.

use crate::models::{NodeRole, OrgNode};

const MANAGER: char = '◆';
const LEAD: char = '●';
const MEMBER: char = '•';

fn role_symbol(role: NodeRole) -> char {
    match role {
        NodeRole::Manager => MANAGER,
        NodeRole::Lead => LEAD,
        NodeRole::Member => MEMBER,
    }
}

/// Render a chart as ASCII art with role symbols.
///
/// Collapsed nodes show how many children are hidden and their subtree is
/// skipped.
///
/// Example output:
/// ```text
/// ◆ Dana Whitfield
/// ├── ● Priya Raman
/// │   ├── • Leo Okafor
/// │   └── • Mei Tanaka
/// └── ● Omar Haddad [+3]
/// ```
pub fn render_tree(root: &OrgNode) -> String {
    let mut output = String::new();
    render_node(&mut output, root, "", true, true);
    output
}

fn render_node(output: &mut String, node: &OrgNode, prefix: &str, is_last: bool, is_root: bool) {
    if !is_root {
        output.push_str(prefix);
        output.push_str(if is_last { "└── " } else { "├── " });
    }
    output.push(role_symbol(node.role));
    output.push(' ');
    output.push_str(&node.name);

    if !node.is_expanded() && !node.children.is_empty() {
        output.push_str(&format!(" [+{}]", node.children.len()));
        output.push('\n');
        return;
    }
    output.push('\n');

    let child_prefix = if is_root {
        String::new()
    } else {
        let continuation = if is_last { "    " } else { "│   " };
        format!("{}{}", prefix, continuation)
    };

    for (i, child) in node.children.iter().enumerate() {
        let child_is_last = i == node.children.len() - 1;
        render_node(output, child, &child_prefix, child_is_last, false);
    }
}
