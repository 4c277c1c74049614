use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A chart document as held in the durable store.
///
/// `schema_version` tags the shape of `body` so a later release can upgrade
/// older documents instead of silently discarding them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    pub key: String,
    pub schema_version: i64,
    pub body: String,
    pub updated_at: DateTime<Utc>,
}

/// A copy of a stored document taken before it was upgraded in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub id: Uuid,
    pub key: String,
    pub schema_version: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
