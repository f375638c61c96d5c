//! Student records and their queries
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::Result;
use crate::local_db::schema::*;
use crate::local_db::table::{Record, TableStore};

pub type StudentStore = TableStore<Student>;

impl Record for Student {
    const TABLE: &'static str = "students";
    type Draft = StudentDraft;
    type Patch = StudentPatch;
    type SortKey = DateTime<Utc>;

    fn from_draft(id: String, created_at: DateTime<Utc>, draft: StudentDraft) -> Self {
        Self {
            id,
            created_at,
            name: draft.name,
            age: draft.age,
            grade: draft.grade,
            department: draft.department,
            teacher_id: draft.teacher_id,
            parts_memorized: draft.parts_memorized,
            current_progress: draft.current_progress,
            previous_progress: draft.previous_progress,
            is_active: draft.is_active,
            parent_name: draft.parent_name,
            parent_phone: draft.parent_phone,
            attendance: draft.attendance,
            images: draft.images,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn sort_key(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn apply(&mut self, patch: StudentPatch) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.age {
            self.age = v;
        }
        if let Some(v) = patch.grade {
            self.grade = v;
        }
        if let Some(v) = patch.department {
            self.department = v;
        }
        if let Some(v) = patch.teacher_id {
            self.teacher_id = v;
        }
        if let Some(v) = patch.parts_memorized {
            self.parts_memorized = v;
        }
        if let Some(v) = patch.current_progress {
            self.current_progress = v;
        }
        if let Some(v) = patch.previous_progress {
            self.previous_progress = v;
        }
        if let Some(v) = patch.is_active {
            self.is_active = v;
        }
        if let Some(v) = patch.parent_name {
            self.parent_name = v;
        }
        if let Some(v) = patch.parent_phone {
            self.parent_phone = v;
        }
        if let Some(v) = patch.attendance {
            self.attendance = v;
        }
        if let Some(v) = patch.images {
            self.images = v;
        }
    }
}

impl TableStore<Student> {
    pub async fn get_by_department(&self, department: Department) -> Result<Vec<Student>> {
        self.filter(|s| s.department == department).await
    }

    pub async fn get_by_teacher_id(&self, teacher_id: &str) -> Result<Vec<Student>> {
        self.filter(|s| s.teacher_id.as_deref() == Some(teacher_id)).await
    }

    pub async fn get_active_count(&self) -> Result<usize> {
        let count = self.get_all().await?.iter().filter(|s| s.is_active).count();
        debug!("Active students: {}", count);
        Ok(count)
    }

    /// Attendance of active students. A student without a recorded
    /// percentage reports 0.
    pub async fn get_attendance_data(&self) -> Result<Vec<StudentAttendance>> {
        Ok(self
            .get_all()
            .await?
            .into_iter()
            .filter(|s| s.is_active)
            .map(|s| StudentAttendance {
                student_id: s.id,
                name: s.name,
                attendance: s.attendance.unwrap_or(0.0),
            })
            .collect())
    }
}
