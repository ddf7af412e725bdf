use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category entity - a uniquely named classification label for posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Category {
    /// Create a new, not yet persisted category.
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Overwrite the provided fields and refresh `updated_at`.
    pub fn apply(&mut self, changes: CategoryChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update of a category.
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
}
