//! Composable post query predicate.
//!
//! Every post lookup and listing is one `PostFilter`. Present equality
//! constraints are AND-ed together, and a non-empty search text adds
//! `(title contains text OR content contains text)` on top of them. Storage
//! backends translate the filter; [`PostFilter::matches`] is the reference
//! evaluation.

use super::Post;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub id: Option<i32>,
    pub author_id: Option<i32>,
    pub category_id: Option<i32>,
    pub text: Option<String>,
}

impl PostFilter {
    /// A filter matching every post.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn by_author(mut self, author_id: i32) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn in_category(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Restrict to posts whose title or content contains `text`.
    ///
    /// An empty text leaves the filter unchanged.
    pub fn matching(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = if text.is_empty() { None } else { Some(text) };
        self
    }

    /// Case-sensitive substring match on title or content.
    pub fn matches_text(&self, post: &Post) -> bool {
        match &self.text {
            Some(text) => post.title.contains(text.as_str()) || post.content.contains(text.as_str()),
            None => true,
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.id.is_none_or(|id| post.id == id)
            && self.author_id.is_none_or(|id| post.author_id == id)
            && self.category_id.is_none_or(|id| post.category_id == id)
            && self.matches_text(post)
    }
}
