use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::local_db::schema::*;
use crate::local_db::table::{Record, TableStore};

pub type SuggestionStore = TableStore<Suggestion>;

impl Record for Suggestion {
    const TABLE: &'static str = "suggestions";
    type Draft = SuggestionDraft;
    type Patch = SuggestionPatch;
    type SortKey = DateTime<Utc>;

    fn from_draft(id: String, created_at: DateTime<Utc>, draft: SuggestionDraft) -> Self {
        Self {
            id,
            created_at,
            title: draft.title,
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            suggested_by: draft.suggested_by,
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

    fn apply(&mut self, patch: SuggestionPatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = patch.priority {
            self.priority = v;
        }
        if let Some(v) = patch.suggested_by {
            self.suggested_by = v;
        }
    }
}

impl TableStore<Suggestion> {
    pub async fn update_status(
        &self,
        id: &str,
        status: SuggestionStatus,
    ) -> Result<Option<Suggestion>> {
        self.update(
            id,
            SuggestionPatch {
                status: Some(status),
                ..Default::default()
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_db::LocalDatabase;

    #[tokio::test]
    async fn test_update_status_marks_implemented() {
        let db = LocalDatabase::new_in_memory().unwrap();
        let suggestion = db
            .suggestions
            .add(SuggestionDraft {
                priority: Some(Priority::High),
                suggested_by: Some("ولي أمر".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        db.suggestions
            .update_status(&suggestion.id, SuggestionStatus::Implemented)
            .await
            .unwrap();
        let stored = db.suggestions.get_by_id(&suggestion.id).await.unwrap().unwrap();
        assert_eq!(stored.status, SuggestionStatus::Implemented);
        assert_eq!(stored.priority, Some(Priority::High));
    }
}
