use serde::{Deserialize, Serialize};

use super::HistoryStatus;

/// The acting session's role. Only `Admin` may mutate the chart.
///
/// Role is process-wide session state and is never persisted: every start
/// (and every logout) lands back on `Viewer`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserRole {
    #[default]
    Viewer,
    Admin,
}

impl UserRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Input for logging in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub password: String,
}

/// Snapshot of the session as seen by a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub role: UserRole,
    pub history: HistoryStatus,
    /// Last durable-store write failure, cleared by the next successful write.
    pub persistence_warning: Option<String>,
}
