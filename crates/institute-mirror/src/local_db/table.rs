//! Single-table storage core shared by every entity service
//!
//! Each table stores one JSON document per record, keyed by the record id,
//! with an autoincrement `seq` column that fixes insertion order.

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::local_db::ordering;

pub type DbPool = Arc<Pool<SqliteConnectionManager>>;

/// A record type persisted in exactly one table.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Name of the backing table.
    const TABLE: &'static str;

    /// Input for `add`: every field except the identity.
    type Draft: Send + 'static;
    /// Partial update merged by `update`. Never carries `id` or `created_at`.
    type Patch: Send + 'static;
    /// Field `get_all` orders by, descending.
    type SortKey: Ord;

    fn from_draft(id: String, created_at: DateTime<Utc>, draft: Self::Draft) -> Self;
    fn id(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
    fn sort_key(&self) -> Self::SortKey;
    fn apply(&mut self, patch: Self::Patch);
}

/// Identity of a new record. Unset parts are generated on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identity {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            created_at: None,
        }
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub(crate) fn resolve(self) -> (String, DateTime<Utc>) {
        (
            self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            self.created_at.unwrap_or_else(Utc::now),
        )
    }
}

/// Run `f` with a pooled connection on the blocking thread pool.
pub(crate) async fn run_blocking<T, F>(pool: &DbPool, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
{
    let pool = Arc::clone(pool);
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        f(&mut conn)
    })
    .await?
}

/// Typed access to the table of `R`.
pub struct TableStore<R> {
    pool: DbPool,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for TableStore<R> {
    fn clone(&self) -> Self {
        Self {
            pool: Arc::clone(&self.pool),
            _record: PhantomData,
        }
    }
}

impl<R: Record> TableStore<R> {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }

    /// Insert a new record with a generated id and creation time.
    pub async fn add(&self, draft: R::Draft) -> Result<R> {
        self.add_with(Identity::default(), draft).await
    }

    /// Insert a new record, keeping whichever identity parts are supplied.
    pub async fn add_with(&self, identity: Identity, draft: R::Draft) -> Result<R> {
        let (id, created_at) = identity.resolve();
        self.insert(R::from_draft(id, created_at, draft)).await
    }

    /// Insert every draft in one transaction. Either all rows land or none do.
    pub async fn add_many(&self, drafts: Vec<R::Draft>) -> Result<Vec<R>> {
        let records: Vec<R> = drafts
            .into_iter()
            .map(|draft| {
                let (id, created_at) = Identity::default().resolve();
                R::from_draft(id, created_at, draft)
            })
            .collect();

        run_blocking(&self.pool, move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            for record in &records {
                Self::insert_row(&tx, record)?;
            }
            tx.commit()?;
            debug!("Inserted batch of {} rows into {}", records.len(), R::TABLE);
            Ok(records)
        })
        .await
    }

    /// Insert a fully built record as-is.
    pub(crate) async fn insert(&self, record: R) -> Result<R> {
        run_blocking(&self.pool, move |conn| {
            Self::insert_row(conn, &record)?;
            debug!("Inserted {} into {}", record.id(), R::TABLE);
            Ok(record)
        })
        .await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<R>> {
        let id = id.to_string();
        run_blocking(&self.pool, move |conn| Self::load_row(conn, &id)).await
    }

    /// Every record, most recent first by the record's sort key.
    pub async fn get_all(&self) -> Result<Vec<R>> {
        let mut records = run_blocking(&self.pool, |conn| Self::scan(conn)).await?;
        ordering::sort_desc_stable(&mut records, R::sort_key);
        Ok(records)
    }

    /// Records matching `pred`, in `get_all` order.
    pub async fn filter<F>(&self, pred: F) -> Result<Vec<R>>
    where
        F: Fn(&R) -> bool,
    {
        Ok(ordering::filter_ordered(self.get_all().await?, pred))
    }

    pub async fn count(&self) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", R::TABLE);
        let count: i64 =
            run_blocking(&self.pool, move |conn| Ok(conn.query_row(&sql, [], |row| row.get(0))?))
                .await?;
        Ok(count as usize)
    }

    /// Merge `patch` into the record at `id`. Returns `None` and writes
    /// nothing when the id is unknown.
    ///
    /// The write lock is taken up front so concurrent updates wait on
    /// `busy_timeout` instead of failing the read-to-write upgrade.
    pub async fn update(&self, id: &str, patch: R::Patch) -> Result<Option<R>> {
        let id = id.to_string();
        run_blocking(&self.pool, move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let Some(mut record) = Self::load_row(&tx, &id)? else {
                debug!("Update of missing {} in {} ignored", id, R::TABLE);
                return Ok(None);
            };
            record.apply(patch);
            let body = serde_json::to_string(&record)?;
            tx.execute(
                &format!("UPDATE {} SET body = ?1 WHERE id = ?2", R::TABLE),
                params![body, id],
            )?;
            tx.commit()?;
            debug!("Updated {} in {}", id, R::TABLE);
            Ok(Some(record))
        })
        .await
    }

    /// Delete the record at `id`. Returns whether a row was removed.
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        run_blocking(&self.pool, move |conn| {
            let deleted = conn.execute(
                &format!("DELETE FROM {} WHERE id = ?1", R::TABLE),
                [&id],
            )?;
            debug!("Removed {} row(s) with id {} from {}", deleted, id, R::TABLE);
            Ok(deleted > 0)
        })
        .await
    }

    fn insert_row(conn: &Connection, record: &R) -> Result<()> {
        let body = serde_json::to_string(record)?;
        conn.execute(
            &format!(
                "INSERT INTO {} (id, created_at, body) VALUES (?1, ?2, ?3)",
                R::TABLE
            ),
            params![record.id(), record.created_at().to_rfc3339(), body],
        )?;
        Ok(())
    }

    fn load_row(conn: &Connection, id: &str) -> Result<Option<R>> {
        let body: Option<String> = conn
            .query_row(
                &format!("SELECT body FROM {} WHERE id = ?1", R::TABLE),
                [id],
                |row| row.get(0),
            )
            .optional()?;
        body.map(|body| Self::decode(id.to_string(), &body)).transpose()
    }

    fn scan(conn: &Connection) -> Result<Vec<R>> {
        let mut stmt = conn.prepare(&format!("SELECT id, body FROM {} ORDER BY seq", R::TABLE))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let id: String = row.get(0)?;
            let body: String = row.get(1)?;
            records.push(Self::decode(id, &body)?);
        }
        Ok(records)
    }

    fn decode(id: String, body: &str) -> Result<R> {
        serde_json::from_str(body).map_err(|source| StorageError::Corrupt {
            table: R::TABLE,
            id,
            source,
        })
    }
}
