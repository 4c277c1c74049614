mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::document;
use crate::models::*;

/// Fixed key under which the whole chart is stored.
pub const STORAGE_KEY: &str = "org_chart_hierarchy";

/// Shape version written alongside every stored document.
pub const DOCUMENT_SCHEMA_VERSION: i64 = 1;

/// One document upgrade step, taking the body from version `n` to `n + 1`.
pub type Upgrade = fn(serde_json::Value) -> Result<serde_json::Value>;

/// Document upgrade steps, keyed by the version they upgrade from.
const UPGRADES: &[(i64, Upgrade)] = &[];

/// Durable home for the current chart.
///
/// Writes happen after every committed change; the application treats a
/// failed write as non-fatal and keeps its in-memory tree.
pub trait TreeStore: Send {
    fn load_tree(&self) -> Result<Option<OrgNode>>;
    fn save_tree(&self, root: &OrgNode) -> Result<()>;
}

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "org-chart")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("org-chart.db"))
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Document operations
    // ============================================================

    pub fn get_document(&self, key: &str) -> Result<Option<StoredDocument>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let doc = conn
            .query_row(
                "SELECT key, schema_version, body, updated_at FROM documents WHERE key = ?",
                [key],
                |row| {
                    Ok(StoredDocument {
                        key: row.get(0)?,
                        schema_version: row.get(1)?,
                        body: row.get(2)?,
                        updated_at: parse_datetime(row.get::<_, String>(3)?),
                    })
                },
            )
            .optional()?;
        Ok(doc)
    }

    pub fn put_document(&self, key: &str, schema_version: i64, body: &str) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "INSERT INTO documents (key, schema_version, body, updated_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET
                schema_version = excluded.schema_version,
                body = excluded.body,
                updated_at = excluded.updated_at",
            (key, schema_version, body, Utc::now().to_rfc3339()),
        )?;
        Ok(())
    }

    /// Load the chart, upgrading an older document in place with `steps`.
    ///
    /// The pre-upgrade row is kept as a snapshot. Documents written by a
    /// newer release are refused rather than overwritten.
    pub fn load_tree_with(&self, steps: &[(i64, Upgrade)]) -> Result<Option<OrgNode>> {
        let Some(doc) = self.get_document(STORAGE_KEY)? else {
            return Ok(None);
        };

        if doc.schema_version == DOCUMENT_SCHEMA_VERSION {
            let root = document::deserialize(&doc.body)
                .context("Stored chart document is invalid")?;
            return Ok(Some(root));
        }

        let body = upgrade_with(steps, doc.schema_version, &doc.body)?;
        let root = document::deserialize(&body).context("Upgraded chart document is invalid")?;

        self.create_snapshot(&doc)?;
        self.put_document(STORAGE_KEY, DOCUMENT_SCHEMA_VERSION, &body)?;
        tracing::info!(
            "Upgraded stored chart from schema version {} to {}",
            doc.schema_version,
            DOCUMENT_SCHEMA_VERSION
        );

        Ok(Some(root))
    }

    // ============================================================
    // Snapshot operations
    // ============================================================

    pub fn create_snapshot(&self, doc: &StoredDocument) -> Result<DocumentSnapshot> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO document_snapshots (id, key, schema_version, body, created_at)
             VALUES (?, ?, ?, ?, ?)",
            (
                id.to_string(),
                &doc.key,
                doc.schema_version,
                &doc.body,
                now.to_rfc3339(),
            ),
        )?;

        Ok(DocumentSnapshot {
            id,
            key: doc.key.clone(),
            schema_version: doc.schema_version,
            body: doc.body.clone(),
            created_at: now,
        })
    }

    pub fn get_snapshots(&self, key: &str) -> Result<Vec<DocumentSnapshot>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, key, schema_version, body, created_at
             FROM document_snapshots WHERE key = ? ORDER BY created_at DESC",
        )?;

        let snapshots = stmt
            .query_map([key], |row| {
                Ok(DocumentSnapshot {
                    id: parse_uuid(row.get::<_, String>(0)?),
                    key: row.get(1)?,
                    schema_version: row.get(2)?,
                    body: row.get(3)?,
                    created_at: parse_datetime(row.get::<_, String>(4)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(snapshots)
    }
}

impl TreeStore for Database {
    fn load_tree(&self) -> Result<Option<OrgNode>> {
        self.load_tree_with(UPGRADES)
    }

    fn save_tree(&self, root: &OrgNode) -> Result<()> {
        let body = document::serialize(root)?;
        self.put_document(STORAGE_KEY, DOCUMENT_SCHEMA_VERSION, &body)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn upgrade_with(steps: &[(i64, Upgrade)], from: i64, body: &str) -> Result<String> {
    if from > DOCUMENT_SCHEMA_VERSION {
        anyhow::bail!(
            "Stored chart uses schema version {}, newer than supported version {}",
            from,
            DOCUMENT_SCHEMA_VERSION
        );
    }

    let mut value: serde_json::Value =
        serde_json::from_str(body).context("Stored chart document is not valid JSON")?;
    let mut version = from;
    while version < DOCUMENT_SCHEMA_VERSION {
        let (_, step) = steps
            .iter()
            .find(|(v, _)| *v == version)
            .ok_or_else(|| anyhow::anyhow!("No upgrade path from schema version {}", version))?;
        value = step(value)?;
        version += 1;
    }

    Ok(serde_json::to_string(&value)?)
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
