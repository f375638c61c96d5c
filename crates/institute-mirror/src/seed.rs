//! Fixture builders.
//!
//! Each helper starts from the entity's default draft, merges the caller's
//! overrides on top, inserts the record and returns it as stored.

use crate::error::Result;
use crate::local_db::schema::*;
use crate::local_db::table::{Identity, Record, TableStore};
use crate::local_db::LocalDatabase;

/// Insert a defaulted record with `overrides` applied and an explicit identity.
pub async fn record_with<R>(
    store: &TableStore<R>,
    identity: Identity,
    overrides: R::Patch,
) -> Result<R>
where
    R: Record,
    R::Draft: Default,
{
    let (id, created_at) = identity.resolve();
    let mut record = R::from_draft(id, created_at, R::Draft::default());
    record.apply(overrides);
    store.insert(record).await
}

/// Insert a defaulted record with a fresh id, the current time and `overrides` applied.
pub async fn record<R>(store: &TableStore<R>, overrides: R::Patch) -> Result<R>
where
    R: Record,
    R::Draft: Default,
{
    record_with(store, Identity::default(), overrides).await
}

pub async fn student(db: &LocalDatabase, overrides: StudentPatch) -> Result<Student> {
    record(&db.students, overrides).await
}

pub async fn teacher(db: &LocalDatabase, overrides: TeacherPatch) -> Result<Teacher> {
    record(&db.teachers, overrides).await
}

pub async fn note(db: &LocalDatabase, overrides: StudentNotePatch) -> Result<StudentNote> {
    record(&db.notes, overrides).await
}

pub async fn attendance(
    db: &LocalDatabase,
    overrides: AttendancePatch,
) -> Result<AttendanceRecord> {
    record(&db.attendance, overrides).await
}

pub async fn meeting(db: &LocalDatabase, overrides: MeetingPatch) -> Result<Meeting> {
    record(&db.meetings, overrides).await
}

pub async fn suggestion(db: &LocalDatabase, overrides: SuggestionPatch) -> Result<Suggestion> {
    record(&db.suggestions, overrides).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_record_is_queryable() {
        let db = LocalDatabase::new_in_memory().unwrap();
        let seeded = student(&db, StudentPatch::default()).await.unwrap();
        assert_eq!(db.students.get_by_id(&seeded.id).await.unwrap(), Some(seeded));
    }

    #[tokio::test]
    async fn test_overrides_win_over_defaults() {
        let db = LocalDatabase::new_in_memory().unwrap();
        let seeded = teacher(
            &db,
            TeacherPatch {
                name: Some("الشيخ عبد الله".to_string()),
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(seeded.name, "الشيخ عبد الله");
        assert!(!seeded.is_active);
        assert_eq!(seeded.specialization, TeacherDraft::default().specialization);
    }

    #[tokio::test]
    async fn test_identity_override() {
        let db = LocalDatabase::new_in_memory().unwrap();
        let seeded = record_with(&db.meetings, Identity::with_id("m-1"), MeetingPatch::default())
            .await
            .unwrap();
        assert_eq!(seeded.id, "m-1");
        assert!(db.meetings.get_by_id("m-1").await.unwrap().is_some());
    }
}
