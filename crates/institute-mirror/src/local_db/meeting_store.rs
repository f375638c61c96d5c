use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::Result;
use crate::local_db::schema::*;
use crate::local_db::table::{Record, TableStore};

pub type MeetingStore = TableStore<Meeting>;

impl Record for Meeting {
    const TABLE: &'static str = "meetings";
    type Draft = MeetingDraft;
    type Patch = MeetingPatch;
    type SortKey = NaiveDateTime;

    fn from_draft(id: String, created_at: DateTime<Utc>, draft: MeetingDraft) -> Self {
        Self {
            id,
            created_at,
            title: draft.title,
            description: draft.description,
            meeting_date: draft.meeting_date,
            attendees: draft.attendees,
            agenda: draft.agenda,
            notes: draft.notes,
            status: draft.status,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn sort_key(&self) -> NaiveDateTime {
        self.meeting_date
    }

    fn apply(&mut self, patch: MeetingPatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.meeting_date {
            self.meeting_date = v;
        }
        if let Some(v) = patch.attendees {
            self.attendees = v;
        }
        if let Some(v) = patch.agenda {
            self.agenda = v;
        }
        if let Some(v) = patch.notes {
            self.notes = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
    }
}

impl TableStore<Meeting> {
    pub async fn update_status(&self, id: &str, status: MeetingStatus) -> Result<Option<Meeting>> {
        self.update(
            id,
            MeetingPatch {
                status: Some(status),
                ..Default::default()
            },
        )
        .await
    }
}
