use serde::{Deserialize, Serialize};

/// Undo/redo availability.
///
/// The history log has four observable states, one per combination of
/// `can_undo` and `can_redo`. The depths are reported for clients that
/// want to show how many steps are available.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryStatus {
    pub can_undo: bool,
    pub can_redo: bool,
    pub undo_depth: usize,
    pub redo_depth: usize,
}

/// Result of an undo or redo request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryStepResponse {
    /// `false` when there was nothing to undo or redo.
    pub changed: bool,
    pub history: HistoryStatus,
    pub tree: super::OrgNode,
}
