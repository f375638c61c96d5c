// institute-mirror/crates/institute-mirror/src/lib.rs

pub mod config;
pub mod error;
pub mod local_db;
pub mod seed;
pub mod telemetry;

// Public API exports
pub use config::Config;
pub use error::{Result, StorageError};
pub use local_db::{
    cascade::{remove_student_cascade, CascadeReport},
    global, Identity, LocalDatabase,
};
