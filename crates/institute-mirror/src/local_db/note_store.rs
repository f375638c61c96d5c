//! Positive and negative notes written about students
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::Result;
use crate::local_db::schema::*;
use crate::local_db::table::{Record, TableStore};

pub type NoteStore = TableStore<StudentNote>;

impl Record for StudentNote {
    const TABLE: &'static str = "student_notes";
    type Draft = StudentNoteDraft;
    type Patch = StudentNotePatch;
    type SortKey = NaiveDate;

    fn from_draft(id: String, created_at: DateTime<Utc>, draft: StudentNoteDraft) -> Self {
        Self {
            id,
            created_at,
            student_id: draft.student_id,
            note_type: draft.note_type,
            content: draft.content,
            note_date: draft.note_date,
            teacher_name: draft.teacher_name,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn sort_key(&self) -> NaiveDate {
        self.note_date
    }

    fn apply(&mut self, patch: StudentNotePatch) {
        if let Some(v) = patch.student_id {
            self.student_id = v;
        }
        if let Some(v) = patch.note_type {
            self.note_type = v;
        }
        if let Some(v) = patch.content {
            self.content = v;
        }
        if let Some(v) = patch.note_date {
            self.note_date = v;
        }
        if let Some(v) = patch.teacher_name {
            self.teacher_name = v;
        }
    }
}

impl TableStore<StudentNote> {
    pub async fn get_by_student_id(&self, student_id: &str) -> Result<Vec<StudentNote>> {
        self.filter(|n| n.student_id == student_id).await
    }
}
