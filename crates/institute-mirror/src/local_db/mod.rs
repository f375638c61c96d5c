//! Local offline mirror - SQLite-backed storage for the institute's records
//!
//! One table per entity, one service per table. The services never touch a
//! table other than their own; multi-table work lives in [`cascade`].
pub mod schema;
pub mod migration;
pub mod ordering;
pub mod table;
pub mod student_store;
pub mod teacher_store;
pub mod note_store;
pub mod attendance_store;
pub mod meeting_store;
pub mod suggestion_store;
pub mod cascade;
pub use schema::*;
pub use migration::MigrationManager;
pub use table::{Identity, Record, TableStore};
pub use student_store::StudentStore;
pub use teacher_store::TeacherStore;
pub use note_store::NoteStore;
pub use attendance_store::AttendanceStore;
pub use meeting_store::MeetingStore;
pub use suggestion_store::SuggestionStore;
use std::sync::Arc;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use tokio::sync::OnceCell;
use tracing::{debug, info};
use crate::config::Config;
use crate::error::Result;
use table::{run_blocking, DbPool};

static GLOBAL: OnceCell<Arc<LocalDatabase>> = OnceCell::const_new();

/// Process-wide store handle, opened on first use from `config`.
///
/// Later calls return the same handle whatever config they pass; concurrent
/// first calls open the store once.
pub async fn global(config: &Config) -> Result<Arc<LocalDatabase>> {
    let handle = GLOBAL
        .get_or_try_init(|| {
            let config = config.clone();
            async move {
                let db = tokio::task::spawn_blocking(move || LocalDatabase::open(&config)).await??;
                Ok::<_, crate::error::StorageError>(Arc::new(db))
            }
        })
        .await?;
    Ok(Arc::clone(handle))
}

/// The embedded store: a connection pool plus one service per table.
pub struct LocalDatabase {
    pub students: StudentStore,
    pub teachers: TeacherStore,
    pub notes: NoteStore,
    pub attendance: AttendanceStore,
    pub meetings: MeetingStore,
    pub suggestions: SuggestionStore,
    pool: DbPool,
}

impl LocalDatabase {
    /// Open (or create) the store file and apply pending migrations.
    pub fn open(config: &Config) -> Result<Self> {
        info!("Opening local database at: {}", config.db_path.display());
        if let Some(parent) = config.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let busy_timeout_ms = config.busy_timeout_ms;
        let manager = SqliteConnectionManager::file(&config.db_path)
            .with_flags(
                rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                    | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                    | rusqlite::OpenFlags::SQLITE_OPEN_FULL_MUTEX,
            )
            .with_init(move |conn| {
                conn.execute_batch(&format!(
                    "PRAGMA journal_mode = WAL;
                     PRAGMA synchronous = NORMAL;
                     PRAGMA busy_timeout = {busy_timeout_ms};"
                ))
            });
        let pool = Pool::builder().max_size(config.pool_size).build(manager)?;

        let db = Self::from_pool(pool)?;
        info!("Local database initialized successfully");
        Ok(db)
    }

    /// A private in-memory store with the full schema.
    ///
    /// Every call yields an isolated store, so tests never share state.
    pub fn new_in_memory() -> Result<Self> {
        let manager = SqliteConnectionManager::memory();
        // An in-memory database lives and dies with its single connection.
        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .build(manager)?;
        Self::from_pool(pool)
    }

    fn from_pool(pool: Pool<SqliteConnectionManager>) -> Result<Self> {
        {
            let mut conn = pool.get()?;
            MigrationManager::new(&mut conn).initialize_database()?;
        }
        let pool = Arc::new(pool);
        Ok(Self {
            students: StudentStore::new(Arc::clone(&pool)),
            teachers: TeacherStore::new(Arc::clone(&pool)),
            notes: NoteStore::new(Arc::clone(&pool)),
            attendance: AttendanceStore::new(Arc::clone(&pool)),
            meetings: MeetingStore::new(Arc::clone(&pool)),
            suggestions: SuggestionStore::new(Arc::clone(&pool)),
            pool,
        })
    }

    pub async fn stats(&self) -> Result<DatabaseStats> {
        run_blocking(&self.pool, |conn| migration::get_database_stats(conn)).await
    }

    pub async fn run_maintenance(&self) -> Result<()> {
        run_blocking(&self.pool, migration::run_maintenance).await
    }
}

impl Drop for LocalDatabase {
    fn drop(&mut self) {
        if let Ok(conn) = self.pool.get() {
            debug!("Checkpointing local database WAL");
            let _ = conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_stores_are_isolated() {
        let a = LocalDatabase::new_in_memory().unwrap();
        let b = LocalDatabase::new_in_memory().unwrap();
        a.students.add(StudentDraft::default()).await.unwrap();

        assert_eq!(a.students.count().await.unwrap(), 1);
        assert_eq!(b.students.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_stats_count_each_table() {
        let db = LocalDatabase::new_in_memory().unwrap();
        db.students.add(StudentDraft::default()).await.unwrap();
        db.meetings.add(MeetingDraft::default()).await.unwrap();
        db.meetings.add(MeetingDraft::default()).await.unwrap();

        let stats = db.stats().await.unwrap();
        assert_eq!(stats.total_students, 1);
        assert_eq!(stats.total_meetings, 2);
        assert_eq!(stats.total_teachers, 0);
        assert_eq!(stats.schema_version, migration::current_schema_version());
    }

    #[tokio::test]
    async fn test_maintenance_succeeds() {
        let db = LocalDatabase::new_in_memory().unwrap();
        db.teachers.add(TeacherDraft::default()).await.unwrap();
        db.run_maintenance().await.unwrap();
    }
}
