//! Daily attendance of students and teachers
//!
//! A record with no `student_id` is the teacher's own attendance for the day.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::error::Result;
use crate::local_db::schema::*;
use crate::local_db::table::{Record, TableStore};

pub type AttendanceStore = TableStore<AttendanceRecord>;

impl Record for AttendanceRecord {
    const TABLE: &'static str = "attendance_records";
    type Draft = AttendanceDraft;
    type Patch = AttendancePatch;
    type SortKey = NaiveDate;

    fn from_draft(id: String, created_at: DateTime<Utc>, draft: AttendanceDraft) -> Self {
        Self {
            id,
            created_at,
            student_id: draft.student_id,
            teacher_id: draft.teacher_id,
            record_date: draft.record_date,
            status: draft.status,
            notes: draft.notes,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn sort_key(&self) -> NaiveDate {
        self.record_date
    }

    fn apply(&mut self, patch: AttendancePatch) {
        if let Some(v) = patch.student_id {
            self.student_id = v;
        }
        if let Some(v) = patch.teacher_id {
            self.teacher_id = v;
        }
        if let Some(v) = patch.record_date {
            self.record_date = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = patch.notes {
            self.notes = v;
        }
    }
}

impl TableStore<AttendanceRecord> {
    pub async fn get_by_date(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>> {
        self.filter(|r| r.record_date == date).await
    }

    pub async fn get_by_student_id(&self, student_id: &str) -> Result<Vec<AttendanceRecord>> {
        self.filter(|r| r.student_id.as_deref() == Some(student_id)).await
    }

    /// The teacher's own attendance, excluding the students they recorded.
    pub async fn get_teacher_attendance(&self, teacher_id: &str) -> Result<Vec<AttendanceRecord>> {
        self.filter(|r| r.student_id.is_none() && r.teacher_id == teacher_id)
            .await
    }

    /// Insert a whole register in one transaction; a failing row rolls back
    /// the entire batch.
    pub async fn add_batch(&self, drafts: Vec<AttendanceDraft>) -> Result<Vec<AttendanceRecord>> {
        let records = self.add_many(drafts).await?;
        info!("Recorded attendance batch of {} rows", records.len());
        Ok(records)
    }
}
