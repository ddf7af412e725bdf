use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity - the identity anchor for posts and comments.
///
/// Users are never updated in place; the directory only creates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new, not yet persisted user. The store assigns the id.
    pub fn new(username: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            username,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}
