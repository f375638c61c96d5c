//! Multi-table operations composed from single-table service calls.
//!
//! There is no transaction spanning tables. When a later step fails, the
//! records already removed are written back before the error is returned.

use tracing::{error, info, warn};

use crate::error::Result;
use crate::local_db::schema::{AttendanceRecord, StudentNote};
use crate::local_db::LocalDatabase;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub student_removed: bool,
    pub notes_removed: usize,
    pub attendance_removed: usize,
}

/// Remove a student along with their notes and attendance records.
pub async fn remove_student_cascade(db: &LocalDatabase, student_id: &str) -> Result<CascadeReport> {
    let notes = db.notes.get_by_student_id(student_id).await?;
    let attendance = db.attendance.get_by_student_id(student_id).await?;

    let mut removed_notes: Vec<StudentNote> = Vec::new();
    let mut removed_attendance: Vec<AttendanceRecord> = Vec::new();

    let outcome = async {
        for note in notes {
            if db.notes.remove(&note.id).await? {
                removed_notes.push(note);
            }
        }
        for record in attendance {
            if db.attendance.remove(&record.id).await? {
                removed_attendance.push(record);
            }
        }
        db.students.remove(student_id).await
    }
    .await;

    match outcome {
        Ok(student_removed) => {
            info!(
                "Removed student {} with {} notes and {} attendance records",
                student_id,
                removed_notes.len(),
                removed_attendance.len()
            );
            Ok(CascadeReport {
                student_removed,
                notes_removed: removed_notes.len(),
                attendance_removed: removed_attendance.len(),
            })
        }
        Err(e) => {
            warn!(
                "Cascade removal of student {} failed, restoring {} notes and {} attendance records: {}",
                student_id,
                removed_notes.len(),
                removed_attendance.len(),
                e
            );
            for note in removed_notes {
                let id = note.id.clone();
                if let Err(restore_err) = db.notes.insert(note).await {
                    error!("Failed to restore note {}: {}", id, restore_err);
                }
            }
            for record in removed_attendance {
                let id = record.id.clone();
                if let Err(restore_err) = db.attendance.insert(record).await {
                    error!("Failed to restore attendance record {}: {}", id, restore_err);
                }
            }
            Err(e)
        }
    }
}
