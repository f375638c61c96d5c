//! Storage fault taxonomy for the local mirror.
//!
//! Only faults of the store itself are errors. A missing record is a normal
//! outcome and is reported as `Ok(None)` / `Ok(false)` by the services.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to get connection from pool: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("corrupt record {id} in table {table}: {source}")]
    Corrupt {
        table: &'static str,
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("database schema version {found} is newer than supported version {supported}")]
    SchemaTooNew { found: i32, supported: i32 },

    #[error("integrity check failed: {0}")]
    Integrity(String),
}
