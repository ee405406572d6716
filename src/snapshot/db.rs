//! SQLite storage for saved bags.
//!
//! Each top-level bag is one row. The row id is the bag's instance id, and
//! the encoded [`BagSnapshot`] is kept as a JSON payload next to a few
//! columns used for listing.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, types::Type, Connection, OptionalExtension};
use serde::Serialize;
use tracing::{debug, info, instrument, trace};

use super::save::{decode_all, LoadReport};
use super::schema::BagSnapshot;
use crate::bag::ItemBag;
use crate::config::{default_db_path, BagTypeIndex};
use crate::error::{BagsError, Result};

/// SQLite schema for bag storage.
const SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS bags (
    instance_id INTEGER PRIMARY KEY AUTOINCREMENT,
    type_id TEXT NOT NULL,
    size TEXT NOT NULL,
    item_count INTEGER NOT NULL DEFAULT 0,
    nested_count INTEGER NOT NULL DEFAULT 0,
    payload TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_bags_type ON bags(type_id);
";

/// Summary information about a stored bag (for listing).
#[derive(Debug, Clone, Serialize)]
pub struct BagSummary {
    pub instance_id: i32,
    pub type_id: String,
    pub size: String,
    pub item_count: u32,
    pub nested_count: u32,
    pub updated_at: DateTime<Utc>,
}

/// Database wrapper for bag storage.
pub struct BagDb {
    conn: Connection,
}

impl BagDb {
    /// Opens or creates a database at the standard location.
    ///
    /// Location: `~/.local/share/item-bags/bags.db`
    #[instrument]
    pub fn open_default() -> Result<Self> {
        let path = default_db_path()?;
        Self::open(&path)
    }

    /// Opens or creates a database at the given path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                BagsError::Store(format!(
                    "Failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        debug!(path = %path.display(), "Opening bag database");
        let conn = Connection::open(path)
            .map_err(|e| BagsError::Store(format!("Failed to open database: {e}")))?;

        let db = Self { conn };
        db.init_schema()?;
        info!(path = %path.display(), "Bag database ready");
        Ok(db)
    }

    /// Creates an in-memory database (useful for testing).
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            BagsError::Store(format!("Failed to create in-memory database: {e}"))
        })?;

        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(SCHEMA_SQL)
            .map_err(|e| BagsError::Store(format!("Failed to initialize schema: {e}")))
    }

    /// Saves a live bag as a new row.
    ///
    /// Returns the instance id the store assigned to it.
    #[instrument(skip_all, fields(type_id = %bag.type_id()))]
    pub fn save_bag(&mut self, bag: &ItemBag) -> Result<i32> {
        self.insert_with(|instance_id| BagSnapshot::encode(instance_id, bag))
    }

    /// Stores a snapshot as-is under a freshly assigned instance id.
    ///
    /// Snapshots imported this way are not decoded first, so records whose
    /// bag type is currently missing are kept rather than lost.
    #[instrument(skip_all, fields(type_id = %snapshot.type_id))]
    pub fn import_snapshot(&mut self, mut snapshot: BagSnapshot) -> Result<i32> {
        self.insert_with(move |instance_id| {
            snapshot.instance_id = instance_id;
            snapshot
        })
    }

    /// Saves several live bags in one transaction.
    ///
    /// Either every bag is stored or none is. Returns the assigned instance
    /// ids in input order.
    #[instrument(skip_all, fields(count = bags.len()))]
    pub fn save_bags(&mut self, bags: &[ItemBag]) -> Result<Vec<i32>> {
        self.insert_batch(
            bags.iter()
                .map(|bag| move |instance_id| BagSnapshot::encode(instance_id, bag)),
        )
    }

    /// Stores several raw snapshots in one transaction, re-id'ing each.
    ///
    /// Either every snapshot is stored or none is.
    #[instrument(skip_all, fields(count = snapshots.len()))]
    pub fn import_snapshots(&mut self, snapshots: Vec<BagSnapshot>) -> Result<Vec<i32>> {
        self.insert_batch(snapshots.into_iter().map(|mut snapshot| {
            move |instance_id| {
                snapshot.instance_id = instance_id;
                snapshot
            }
        }))
    }

    fn insert_with<F>(&mut self, build: F) -> Result<i32>
    where
        F: FnOnce(i32) -> BagSnapshot,
    {
        self.insert_batch(std::iter::once(build))?
            .first()
            .copied()
            .ok_or_else(|| BagsError::Store("Insert assigned no instance id".to_string()))
    }

    fn insert_batch<I, F>(&mut self, builders: I) -> Result<Vec<i32>>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce(i32) -> BagSnapshot,
    {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| BagsError::Store(format!("Failed to start transaction: {e}")))?;

        let now = Utc::now().to_rfc3339();
        let mut ids = Vec::new();
        for build in builders {
            ids.push(insert_row(&tx, build, &now)?);
        }

        // Dropping `tx` on an early return rolls every row back.
        tx.commit()
            .map_err(|e| BagsError::Store(format!("Failed to commit transaction: {e}")))?;

        debug!(count = ids.len(), "Bag batch committed");
        Ok(ids)
    }

    /// Overwrites an existing row with the current state of `bag`.
    ///
    /// Returns false if no bag with this instance id is stored.
    #[instrument(skip(self, bag))]
    pub fn replace_bag(&mut self, instance_id: i32, bag: &ItemBag) -> Result<bool> {
        if !self.bag_exists(instance_id)? {
            debug!("Bag not found for replacement");
            return Ok(false);
        }
        let snapshot = BagSnapshot::encode(instance_id, bag);
        write_payload(&self.conn, &snapshot, &Utc::now().to_rfc3339())?;
        info!(instance_id, "Bag replaced");
        Ok(true)
    }

    /// Loads the raw snapshot of one bag.
    #[instrument(skip(self))]
    pub fn load_snapshot(&self, instance_id: i32) -> Result<Option<BagSnapshot>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM bags WHERE instance_id = ?1",
                params![instance_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| BagsError::Store(format!("Failed to query bag: {e}")))?;

        payload
            .map(|payload| parse_payload(instance_id, &payload))
            .transpose()
    }

    /// Loads and decodes one bag.
    pub fn load_bag(&self, instance_id: i32, index: &BagTypeIndex) -> Result<ItemBag> {
        let snapshot = self
            .load_snapshot(instance_id)?
            .ok_or(BagsError::BagNotFound { instance_id })?;
        Ok(snapshot.decode(index)?)
    }

    /// Loads every stored snapshot, ordered by instance id.
    #[instrument(skip(self))]
    pub fn snapshots(&self) -> Result<Vec<BagSnapshot>> {
        let mut stmt = self
            .conn
            .prepare("SELECT instance_id, payload FROM bags ORDER BY instance_id")
            .map_err(|e| BagsError::Store(format!("Failed to prepare statement: {e}")))?;

        let rows: Vec<(i32, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .map_err(|e| BagsError::Store(format!("Failed to query bags: {e}")))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| BagsError::Store(format!("Failed to collect bags: {e}")))?;

        let snapshots = rows
            .iter()
            .map(|(instance_id, payload)| parse_payload(*instance_id, payload))
            .collect::<Result<Vec<_>>>()?;

        debug!(count = snapshots.len(), "Loaded stored snapshots");
        Ok(snapshots)
    }

    /// Decodes every stored bag, skipping the ones that no longer resolve.
    pub fn load_all(&self, index: &BagTypeIndex) -> Result<LoadReport> {
        Ok(decode_all(self.snapshots()?, index))
    }

    /// Lists all stored bags with summary information.
    #[instrument(skip(self))]
    pub fn list_bags(&self) -> Result<Vec<BagSummary>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT instance_id, type_id, size, item_count, nested_count, updated_at
                 FROM bags ORDER BY instance_id",
            )
            .map_err(|e| BagsError::Store(format!("Failed to prepare statement: {e}")))?;

        let summaries: Vec<BagSummary> = stmt
            .query_map([], |row| {
                let updated_at: String = row.get(5)?;
                Ok(BagSummary {
                    instance_id: row.get(0)?,
                    type_id: row.get(1)?,
                    size: row.get(2)?,
                    item_count: row.get(3)?,
                    nested_count: row.get(4)?,
                    updated_at: DateTime::parse_from_rfc3339(&updated_at)
                        .map(|dt| dt.with_timezone(&Utc))
                        .map_err(|e| {
                            rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e))
                        })?,
                })
            })
            .map_err(|e| BagsError::Store(format!("Failed to query bags: {e}")))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| BagsError::Store(format!("Failed to collect bags: {e}")))?;

        debug!(count = summaries.len(), "Listed bags");
        Ok(summaries)
    }

    /// Deletes a bag by instance id.
    ///
    /// Returns true if a bag was deleted, false if not found.
    #[instrument(skip(self))]
    pub fn delete_bag(&mut self, instance_id: i32) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM bags WHERE instance_id = ?1", params![instance_id])
            .map_err(|e| BagsError::Store(format!("Failed to delete bag: {e}")))?;

        if deleted > 0 {
            info!(instance_id, "Bag deleted");
            Ok(true)
        } else {
            debug!(instance_id, "Bag not found for deletion");
            Ok(false)
        }
    }

    /// Checks if a bag exists by instance id.
    pub fn bag_exists(&self, instance_id: i32) -> Result<bool> {
        self.conn
            .query_row(
                "SELECT 1 FROM bags WHERE instance_id = ?1",
                params![instance_id],
                |_| Ok(()),
            )
            .optional()
            .map(|row| row.is_some())
            .map_err(|e| BagsError::Store(format!("Failed to query bag: {e}")))
    }
}

fn insert_row<F>(conn: &Connection, build: F, now: &str) -> Result<i32>
where
    F: FnOnce(i32) -> BagSnapshot,
{
    conn.execute(
        "INSERT INTO bags (type_id, size, payload, created_at, updated_at)
         VALUES ('', '', '{}', ?1, ?1)",
        params![now],
    )
    .map_err(|e| BagsError::Store(format!("Failed to insert bag: {e}")))?;

    let rowid = conn.last_insert_rowid();
    let instance_id = i32::try_from(rowid)
        .map_err(|_| BagsError::Store(format!("Instance id {rowid} out of range")))?;

    let snapshot = build(instance_id);
    write_payload(conn, &snapshot, now)?;

    info!(instance_id, type_id = %snapshot.type_id, "Bag saved");
    Ok(instance_id)
}

fn write_payload(conn: &Connection, snapshot: &BagSnapshot, now: &str) -> Result<()> {
    let payload = serde_json::to_string(snapshot)
        .map_err(|e| BagsError::SaveParse(format!("Failed to encode bag: {e}")))?;
    let item_count = u32::try_from(snapshot.item_count()).unwrap_or(u32::MAX);
    let nested_count = u32::try_from(snapshot.nested_bags.len()).unwrap_or(u32::MAX);

    trace!(instance_id = snapshot.instance_id, bytes = payload.len(), "Writing bag payload");
    conn.execute(
        "UPDATE bags SET type_id = ?1, size = ?2, item_count = ?3, nested_count = ?4,
                payload = ?5, updated_at = ?6
         WHERE instance_id = ?7",
        params![
            snapshot.type_id,
            snapshot.size.as_str(),
            item_count,
            nested_count,
            payload,
            now,
            snapshot.instance_id,
        ],
    )
    .map_err(|e| BagsError::Store(format!("Failed to write bag: {e}")))?;
    Ok(())
}

/// The row id is authoritative over any `InstanceId` inside the payload.
fn parse_payload(instance_id: i32, payload: &str) -> Result<BagSnapshot> {
    let mut snapshot: BagSnapshot = serde_json::from_str(payload).map_err(|e| {
        BagsError::SaveParse(format!("Stored bag {instance_id} is corrupt: {e}"))
    })?;
    snapshot.instance_id = instance_id;
    Ok(snapshot)
}
