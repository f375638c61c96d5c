//! Versioned schema migrations for the local store

use rusqlite::{Connection, OptionalExtension};
use tracing::{error, info, warn};

use crate::error::{Result, StorageError};
use crate::local_db::schema;

/// A schema step. Each runs once, in its own transaction, in version order.
pub struct Migration {
    pub version: i32,
    pub description: &'static str,
    pub sql: &'static str,
}

/// All known migrations, oldest first.
pub fn get_migrations() -> &'static [Migration] {
    const MIGRATIONS: &[Migration] = &[Migration {
        version: 1,
        description: "entity document tables",
        sql: include_str!("migrations/001_initial.sql"),
    }];
    MIGRATIONS
}

/// Highest schema version this build understands.
pub fn current_schema_version() -> i32 {
    get_migrations().last().map(|m| m.version).unwrap_or(0)
}

/// Manages database schema migrations
pub struct MigrationManager<'a> {
    conn: &'a mut Connection,
}

impl<'a> MigrationManager<'a> {
    pub fn new(conn: &'a mut Connection) -> Self {
        Self { conn }
    }

    /// Bring the database up to the current schema version.
    pub fn initialize_database(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY,
                applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        let found = self.get_current_version()?;
        let supported = current_schema_version();
        info!("Current local schema version: {} (supported: {})", found, supported);

        if found > supported {
            error!("Local database was written by a newer schema version {}", found);
            return Err(StorageError::SchemaTooNew { found, supported });
        }

        self.apply_migrations(found)
    }

    fn apply_migrations(&mut self, current_version: i32) -> Result<()> {
        for migration in get_migrations().iter().filter(|m| m.version > current_version) {
            info!(
                "Applying migration {} ({})...",
                migration.version, migration.description
            );

            let tx = self.conn.transaction()?;
            if let Err(e) = tx.execute_batch(migration.sql) {
                error!("Failed to apply migration {}: {}", migration.version, e);
                return Err(e.into());
            }
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                [migration.version],
            )?;
            tx.commit()?;

            info!("Migration {} applied", migration.version);
        }
        Ok(())
    }

    pub fn get_current_version(&self) -> Result<i32> {
        Ok(self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )?)
    }

    pub fn has_migration_applied(&self, version: i32) -> Result<bool> {
        Ok(self
            .conn
            .query_row(
                "SELECT 1 FROM schema_version WHERE version = ?1",
                [version],
                |_| Ok(()),
            )
            .optional()?
            .is_some())
    }
}

/// Row counts, schema version and file size. Read-only.
pub fn get_database_stats(conn: &Connection) -> Result<schema::DatabaseStats> {
    fn table_count(conn: &Connection, table: &str) -> Result<i64> {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })?)
    }

    let schema_version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    let database_size_bytes: i64 = conn.query_row(
        "SELECT page_count * page_size FROM pragma_page_count(), pragma_page_size()",
        [],
        |row| row.get(0),
    )?;

    Ok(schema::DatabaseStats {
        schema_version,
        total_students: table_count(conn, "students")?,
        total_teachers: table_count(conn, "teachers")?,
        total_notes: table_count(conn, "student_notes")?,
        total_attendance: table_count(conn, "attendance_records")?,
        total_meetings: table_count(conn, "meetings")?,
        total_suggestions: table_count(conn, "suggestions")?,
        database_size_bytes,
    })
}

/// Refresh planner statistics and verify the file's integrity.
pub fn run_maintenance(conn: &mut Connection) -> Result<()> {
    info!("Running local database maintenance...");

    conn.execute_batch("ANALYZE")?;

    let verdict: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
    if verdict != "ok" {
        warn!("Integrity check reported: {}", verdict);
        return Err(StorageError::Integrity(verdict));
    }

    info!("Local database maintenance completed");
    Ok(())
}
