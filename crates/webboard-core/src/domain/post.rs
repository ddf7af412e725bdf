use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Comment, User};

/// Post entity - a content unit with one author and one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author_id: i32,
    pub category_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a new, not yet persisted post.
    pub fn new(title: String, content: String, author_id: i32, category_id: i32) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            title,
            content,
            author_id,
            category_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Merge the provided fields over this post and refresh `updated_at`.
    ///
    /// The author is not part of [`PostChanges`] and can never be reassigned.
    /// The category id must already have been resolved by the caller.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(category_id) = changes.category_id {
            self.category_id = category_id;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update of a post.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<i32>,
}

/// A post together with its eagerly loaded relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub author: User,
    pub category: Category,
    pub comments: Vec<Comment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_author() {
        let mut post = Post::new("title".into(), "body".into(), 7, 1);
        let before = post.updated_at;

        post.apply(PostChanges {
            title: Some("new title".into()),
            content: None,
            category_id: Some(3),
        });

        assert_eq!(post.author_id, 7);
        assert_eq!(post.title, "new title");
        assert_eq!(post.content, "body");
        assert_eq!(post.category_id, 3);
        assert!(post.updated_at >= before);
    }

    #[test]
    fn test_detail_serializes_flat() {
        let author = User::new("alice".into());
        let category = Category::new("news".into());
        let detail = PostDetail {
            post: Post::new("t".into(), "c".into(), 1, 2),
            author,
            category,
            comments: vec![],
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["title"], "t");
        assert_eq!(json["authorId"], 1);
        assert_eq!(json["author"]["username"], "alice");
        assert!(json["comments"].as_array().unwrap().is_empty());
    }
}
