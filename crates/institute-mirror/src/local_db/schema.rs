//! Record definitions for the local mirror
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Departments of the institute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    #[default]
    Quran,
    Sharia,
    Arabic,
    Administration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    #[default]
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
}

/// Meeting status, persisted with the labels the hosted schema uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MeetingStatus {
    #[default]
    #[serde(rename = "مجدولة")]
    Scheduled,
    #[serde(rename = "مكتملة")]
    Completed,
    #[serde(rename = "ملغاة")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    #[default]
    Pending,
    Implemented,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

// ---------------------------------------------------------------------------
// Student
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub age: u8,
    pub grade: String,
    pub department: Department,
    #[serde(default)]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub parts_memorized: u32,
    #[serde(default)]
    pub current_progress: String,
    #[serde(default)]
    pub previous_progress: String,
    pub is_active: bool,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub parent_phone: Option<String>,
    /// Attendance percentage.
    #[serde(default)]
    pub attendance: Option<f64>,
    /// Memorization-tracking snapshot, stored as-is.
    #[serde(default)]
    pub images: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentDraft {
    pub name: String,
    pub age: u8,
    pub grade: String,
    pub department: Department,
    pub teacher_id: Option<String>,
    pub parts_memorized: u32,
    pub current_progress: String,
    pub previous_progress: String,
    pub is_active: bool,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub attendance: Option<f64>,
    pub images: Option<serde_json::Value>,
}

impl Default for StudentDraft {
    fn default() -> Self {
        Self {
            name: "طالب".to_string(),
            age: 10,
            grade: "الأول".to_string(),
            department: Department::Quran,
            teacher_id: None,
            parts_memorized: 0,
            current_progress: String::new(),
            previous_progress: String::new(),
            is_active: true,
            parent_name: None,
            parent_phone: None,
            attendance: None,
            images: None,
        }
    }
}

/// Partial update of a [`Student`]. `Some(None)` clears a nullable field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub age: Option<u8>,
    pub grade: Option<String>,
    pub department: Option<Department>,
    pub teacher_id: Option<Option<String>>,
    pub parts_memorized: Option<u32>,
    pub current_progress: Option<String>,
    pub previous_progress: Option<String>,
    pub is_active: Option<bool>,
    pub parent_name: Option<Option<String>>,
    pub parent_phone: Option<Option<String>>,
    pub attendance: Option<Option<f64>>,
    pub images: Option<Option<serde_json::Value>>,
}

/// Attendance figure of one active student.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAttendance {
    pub student_id: String,
    pub name: String,
    pub attendance: f64,
}

// ---------------------------------------------------------------------------
// Teacher
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub department: Department,
    #[serde(default)]
    pub specialization: String,
    pub is_active: bool,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeacherDraft {
    pub name: String,
    pub department: Department,
    pub specialization: String,
    pub is_active: bool,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub experience: Option<String>,
}

impl Default for TeacherDraft {
    fn default() -> Self {
        Self {
            name: "معلم".to_string(),
            department: Department::Quran,
            specialization: "تحفيظ".to_string(),
            is_active: true,
            email: None,
            phone: None,
            experience: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeacherPatch {
    pub name: Option<String>,
    pub department: Option<Department>,
    pub specialization: Option<String>,
    pub is_active: Option<bool>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub experience: Option<Option<String>>,
}

// ---------------------------------------------------------------------------
// StudentNote
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentNote {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub student_id: String,
    #[serde(rename = "type")]
    pub note_type: NoteType,
    pub content: String,
    pub note_date: NaiveDate,
    #[serde(default)]
    pub teacher_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentNoteDraft {
    pub student_id: String,
    pub note_type: NoteType,
    pub content: String,
    pub note_date: NaiveDate,
    pub teacher_name: String,
}

impl Default for StudentNoteDraft {
    fn default() -> Self {
        Self {
            student_id: String::new(),
            note_type: NoteType::Positive,
            content: "ملاحظة".to_string(),
            note_date: Utc::now().date_naive(),
            teacher_name: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentNotePatch {
    pub student_id: Option<String>,
    pub note_type: Option<NoteType>,
    pub content: Option<String>,
    pub note_date: Option<NaiveDate>,
    pub teacher_name: Option<String>,
}

// ---------------------------------------------------------------------------
// AttendanceRecord
// ---------------------------------------------------------------------------

/// Attendance of a student, or of the teacher when `student_id` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub student_id: Option<String>,
    pub teacher_id: String,
    pub record_date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceDraft {
    pub student_id: Option<String>,
    pub teacher_id: String,
    pub record_date: NaiveDate,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

impl Default for AttendanceDraft {
    fn default() -> Self {
        Self {
            student_id: None,
            teacher_id: String::new(),
            record_date: Utc::now().date_naive(),
            status: AttendanceStatus::Present,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendancePatch {
    pub student_id: Option<Option<String>>,
    pub teacher_id: Option<String>,
    pub record_date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
    pub notes: Option<Option<String>>,
}

// ---------------------------------------------------------------------------
// Meeting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub meeting_date: NaiveDateTime,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub agenda: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: MeetingStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeetingDraft {
    pub title: String,
    pub description: String,
    pub meeting_date: NaiveDateTime,
    pub attendees: Vec<String>,
    pub agenda: Vec<String>,
    pub notes: Option<String>,
    pub status: MeetingStatus,
}

impl Default for MeetingDraft {
    fn default() -> Self {
        Self {
            title: "اجتماع".to_string(),
            description: String::new(),
            meeting_date: Utc::now().naive_utc(),
            attendees: Vec::new(),
            agenda: Vec::new(),
            notes: None,
            status: MeetingStatus::Scheduled,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeetingPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub meeting_date: Option<NaiveDateTime>,
    pub attendees: Option<Vec<String>>,
    pub agenda: Option<Vec<String>>,
    pub notes: Option<Option<String>>,
    pub status: Option<MeetingStatus>,
}

// ---------------------------------------------------------------------------
// Suggestion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: SuggestionStatus,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub suggested_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionDraft {
    pub title: String,
    pub description: String,
    pub status: SuggestionStatus,
    pub priority: Option<Priority>,
    pub suggested_by: Option<String>,
}

impl Default for SuggestionDraft {
    fn default() -> Self {
        Self {
            title: "اقتراح".to_string(),
            description: String::new(),
            status: SuggestionStatus::Pending,
            priority: None,
            suggested_by: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<SuggestionStatus>,
    pub priority: Option<Option<Priority>>,
    pub suggested_by: Option<Option<String>>,
}

// ---------------------------------------------------------------------------
// Store statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseStats {
    pub schema_version: i32,
    pub total_students: i64,
    pub total_teachers: i64,
    pub total_notes: i64,
    pub total_attendance: i64,
    pub total_meetings: i64,
    pub total_suggestions: i64,
    pub database_size_bytes: i64,
}
