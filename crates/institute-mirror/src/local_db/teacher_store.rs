use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::local_db::schema::*;
use crate::local_db::table::{Record, TableStore};

pub type TeacherStore = TableStore<Teacher>;

impl Record for Teacher {
    const TABLE: &'static str = "teachers";
    type Draft = TeacherDraft;
    type Patch = TeacherPatch;
    type SortKey = DateTime<Utc>;

    fn from_draft(id: String, created_at: DateTime<Utc>, draft: TeacherDraft) -> Self {
        Self {
            id,
            created_at,
            name: draft.name,
            department: draft.department,
            specialization: draft.specialization,
            is_active: draft.is_active,
            email: draft.email,
            phone: draft.phone,
            experience: draft.experience,
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

    fn apply(&mut self, patch: TeacherPatch) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.department {
            self.department = v;
        }
        if let Some(v) = patch.specialization {
            self.specialization = v;
        }
        if let Some(v) = patch.is_active {
            self.is_active = v;
        }
        if let Some(v) = patch.email {
            self.email = v;
        }
        if let Some(v) = patch.phone {
            self.phone = v;
        }
        if let Some(v) = patch.experience {
            self.experience = v;
        }
    }
}

impl TableStore<Teacher> {
    pub async fn get_by_department(&self, department: Department) -> Result<Vec<Teacher>> {
        self.filter(|t| t.department == department).await
    }

    pub async fn get_active(&self) -> Result<Vec<Teacher>> {
        self.filter(|t| t.is_active).await
    }
}
