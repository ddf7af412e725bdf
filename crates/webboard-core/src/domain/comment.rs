use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity - a reply to a post, owned by its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i32,
    pub content: String,
    pub author_id: i32,
    pub post_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Create a new, not yet persisted comment.
    pub fn new(post_id: i32, author_id: i32, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            content,
            author_id,
            post_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Whether `user_id` is the stored author of this comment.
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.author_id == user_id
    }
}
