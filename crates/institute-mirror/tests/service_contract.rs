//! Behaviour every entity service shares, plus the documented scenarios.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, Utc};
use institute_mirror::local_db::*;
use institute_mirror::seed;

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[tokio::test]
async fn add_then_get_by_id_round_trips_every_entity() {
    let db = LocalDatabase::new_in_memory().unwrap();

    let student = db.students.add(StudentDraft::default()).await.unwrap();
    assert_eq!(db.students.get_by_id(&student.id).await.unwrap(), Some(student));

    let teacher = db.teachers.add(TeacherDraft::default()).await.unwrap();
    assert_eq!(db.teachers.get_by_id(&teacher.id).await.unwrap(), Some(teacher));

    let note = db.notes.add(StudentNoteDraft::default()).await.unwrap();
    assert_eq!(db.notes.get_by_id(&note.id).await.unwrap(), Some(note));

    let record = db.attendance.add(AttendanceDraft::default()).await.unwrap();
    assert_eq!(db.attendance.get_by_id(&record.id).await.unwrap(), Some(record));

    let meeting = db.meetings.add(MeetingDraft::default()).await.unwrap();
    assert_eq!(db.meetings.get_by_id(&meeting.id).await.unwrap(), Some(meeting));

    let suggestion = db.suggestions.add(SuggestionDraft::default()).await.unwrap();
    assert_eq!(db.suggestions.get_by_id(&suggestion.id).await.unwrap(), Some(suggestion));
}

#[tokio::test]
async fn get_by_id_of_unknown_id_is_none() {
    let db = LocalDatabase::new_in_memory().unwrap();
    assert!(db.students.get_by_id("nope").await.unwrap().is_none());
    assert!(db.meetings.get_by_id("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn get_all_is_newest_first_with_stable_ties() {
    let db = LocalDatabase::new_in_memory().unwrap();
    let base = Utc::now();

    let older = seed::record_with(
        &db.students,
        Identity::with_id("older").created_at(base - Duration::days(1)),
        StudentPatch::default(),
    )
    .await
    .unwrap();
    let tie_a = seed::record_with(
        &db.students,
        Identity::with_id("tie-a").created_at(base),
        StudentPatch::default(),
    )
    .await
    .unwrap();
    let tie_b = seed::record_with(
        &db.students,
        Identity::with_id("tie-b").created_at(base),
        StudentPatch::default(),
    )
    .await
    .unwrap();

    let ids: Vec<String> = db.students.get_all().await.unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![tie_a.id, tie_b.id, older.id]);
}

#[tokio::test]
async fn attendance_orders_by_record_date() {
    let db = LocalDatabase::new_in_memory().unwrap();
    for date in ["2025-01-03", "2025-01-01", "2025-01-02"] {
        seed::attendance(
            &db,
            AttendancePatch {
                record_date: Some(day(date)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    let dates: Vec<NaiveDate> = db
        .attendance
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.record_date)
        .collect();
    assert_eq!(dates, vec![day("2025-01-03"), day("2025-01-02"), day("2025-01-01")]);
}

#[tokio::test]
async fn update_overwrites_patch_keys_only() {
    let db = LocalDatabase::new_in_memory().unwrap();
    let before = seed::student(
        &db,
        StudentPatch {
            name: Some("عمر".to_string()),
            parent_phone: Some(Some("0500000000".to_string())),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let patch = StudentPatch {
        parts_memorized: Some(5),
        current_progress: Some("سورة البقرة".to_string()),
        ..Default::default()
    };
    let returned = db.students.update(&before.id, patch).await.unwrap().unwrap();
    let fetched = db.students.get_by_id(&before.id).await.unwrap().unwrap();

    let expected = Student {
        parts_memorized: 5,
        current_progress: "سورة البقرة".to_string(),
        ..before.clone()
    };
    assert_eq!(returned, expected);
    assert_eq!(fetched, expected);
    assert_eq!(fetched.id, before.id);
    assert_eq!(fetched.created_at, before.created_at);
}

#[tokio::test]
async fn update_of_missing_id_creates_nothing() {
    let db = LocalDatabase::new_in_memory().unwrap();
    seed::teacher(&db, TeacherPatch::default()).await.unwrap();

    let result = db
        .teachers
        .update(
            "ghost",
            TeacherPatch {
                name: Some("شبح".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(result.is_none());
    assert_eq!(db.teachers.get_all().await.unwrap().len(), 1);
    assert!(db.teachers.get_by_id("ghost").await.unwrap().is_none());
}

#[tokio::test]
async fn remove_is_final_and_tolerates_unknown_ids() {
    let db = LocalDatabase::new_in_memory().unwrap();
    let note = seed::note(&db, StudentNotePatch::default()).await.unwrap();
    seed::note(&db, StudentNotePatch::default()).await.unwrap();

    assert!(db.notes.remove(&note.id).await.unwrap());
    assert!(db.notes.get_by_id(&note.id).await.unwrap().is_none());

    assert!(!db.notes.remove("unknown").await.unwrap());
    assert_eq!(db.notes.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn removing_student_leaves_dependents() {
    let db = LocalDatabase::new_in_memory().unwrap();
    let student = seed::student(&db, StudentPatch::default()).await.unwrap();
    seed::note(
        &db,
        StudentNotePatch {
            student_id: Some(student.id.clone()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    db.students.remove(&student.id).await.unwrap();
    assert_eq!(db.notes.get_by_student_id(&student.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn active_count_matches_seeded_mixture() {
    let db = LocalDatabase::new_in_memory().unwrap();
    let flags = [true, false, true, true, false];
    for is_active in flags {
        seed::student(
            &db,
            StudentPatch {
                is_active: Some(is_active),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }
    assert_eq!(db.students.get_active_count().await.unwrap(), 3);
}

#[tokio::test]
async fn get_by_department_is_exact_subset_in_order() {
    let db = LocalDatabase::new_in_memory().unwrap();
    for department in [
        Department::Arabic,
        Department::Quran,
        Department::Arabic,
        Department::Sharia,
    ] {
        seed::student(
            &db,
            StudentPatch {
                department: Some(department),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    let expected: Vec<Student> = db
        .students
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .filter(|s| s.department == Department::Arabic)
        .collect();
    let arabic = db.students.get_by_department(Department::Arabic).await.unwrap();
    assert_eq!(arabic.len(), 2);
    assert_eq!(arabic, expected);
}

#[tokio::test]
async fn add_batch_inserts_three_distinct_records() {
    let db = LocalDatabase::new_in_memory().unwrap();
    let before = db.attendance.get_all().await.unwrap().len();

    let drafts = (1..=3)
        .map(|n| AttendanceDraft {
            student_id: Some(format!("s{n}")),
            teacher_id: "t1".to_string(),
            record_date: day("2025-04-01"),
            status: AttendanceStatus::Present,
            notes: None,
        })
        .collect();
    db.attendance.add_batch(drafts).await.unwrap();

    let all = db.attendance.get_all().await.unwrap();
    assert_eq!(all.len(), before + 3);
    let ids: HashSet<&str> = all.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn scenario_new_active_student_attendance() {
    let db = LocalDatabase::new_in_memory().unwrap();
    seed::student(
        &db,
        StudentPatch {
            name: Some("طالب جديد".to_string()),
            is_active: Some(true),
            attendance: Some(Some(100.0)),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let data = db.students.get_attendance_data().await.unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].attendance, 100.0);
    assert_eq!(data[0].name, "طالب جديد");
}

#[tokio::test]
async fn scenario_latest_note_first() {
    let db = LocalDatabase::new_in_memory().unwrap();
    for date in ["2025-01-01", "2025-06-01"] {
        seed::note(
            &db,
            StudentNotePatch {
                student_id: Some("student-1".to_string()),
                note_date: Some(day(date)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    let notes = db.notes.get_all().await.unwrap();
    assert_eq!(notes[0].note_date, day("2025-06-01"));
    assert_eq!(notes[1].note_date, day("2025-01-01"));
}

#[tokio::test]
async fn scenario_meeting_status_update() {
    let db = LocalDatabase::new_in_memory().unwrap();
    let meeting = db
        .meetings
        .add(MeetingDraft {
            status: MeetingStatus::Scheduled,
            ..Default::default()
        })
        .await
        .unwrap();

    db.meetings
        .update_status(&meeting.id, MeetingStatus::Completed)
        .await
        .unwrap();

    let all = db.meetings.get_all().await.unwrap();
    assert_eq!(all[0].status, MeetingStatus::Completed);
    assert_eq!(serde_json::to_value(all[0].status).unwrap(), "مكتملة");
}
