use thiserror::Error;

/// Errors surfaced by chart operations.
///
/// None of these are fatal: each is returned synchronously to the caller and
/// the chart is left exactly as it was before the rejected operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrgError {
    #[error("node not found: {0}")]
    NotFound(String),

    #[error("permission denied: admin role required")]
    PermissionDenied,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid hierarchy document: {0}")]
    ImportFormat(String),

    #[error("failed to persist chart: {0}")]
    Persistence(String),
}

impl OrgError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn import_format(msg: impl Into<String>) -> Self {
        Self::ImportFormat(msg.into())
    }
}

pub type OrgResult<T> = std::result::Result<T, OrgError>;
