//! Persisted document format.
//!
//! The same JSON shape is used for the durable store and for exported files:
//!
//! ```json
//! { "id": "...", "name": "...", "role": "Manager", "expanded": true, "children": [ ... ] }
//! ```

use crate::error::{OrgError, OrgResult};
use crate::hierarchy;
use crate::models::OrgNode;

/// File name offered for exported charts.
pub const EXPORT_FILE_NAME: &str = "org-chart-hierarchy.json";

/// Compact encoding used by the durable store.
pub fn serialize(root: &OrgNode) -> OrgResult<String> {
    serde_json::to_string(root).map_err(|e| OrgError::Persistence(e.to_string()))
}

/// Pretty-printed encoding used for exports.
pub fn serialize_pretty(root: &OrgNode) -> OrgResult<String> {
    serde_json::to_string_pretty(root).map_err(|e| OrgError::Persistence(e.to_string()))
}

/// Parse and validate a hierarchy document.
///
/// The top-level `role` is checked before anything else so a document with
/// the wrong root is reported as such even if the rest would not parse.
pub fn deserialize(text: &str) -> OrgResult<OrgNode> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| OrgError::import_format(format!("failed to parse document: {e}")))?;

    match value.get("role").and_then(|r| r.as_str()) {
        Some("Manager") => {}
        Some(other) => {
            return Err(OrgError::import_format(format!(
                "root role must be Manager, found {other}"
            )));
        }
        None => return Err(OrgError::import_format("root role is missing")),
    }

    let root: OrgNode = serde_json::from_value(value)
        .map_err(|e| OrgError::import_format(format!("malformed node: {e}")))?;
    hierarchy::validate(&root)?;
    Ok(root)
}
