//! Data Transfer Objects - request types for the API.
//!
//! Each request checks its own shape with `validate`, collecting every
//! problem instead of stopping at the first.

use serde::{Deserialize, Serialize};

fn require_text(errors: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{field} must not be empty"));
    }
}

fn require_optional_text(errors: &mut Vec<String>, field: &str, value: Option<&str>) {
    if let Some(value) = value {
        require_text(errors, field, value);
    }
}

fn require_id(errors: &mut Vec<String>, field: &str, value: i32) {
    if value <= 0 {
        errors.push(format!("{field} must be a positive id"));
    }
}

fn finish(errors: Vec<String>) -> Result<(), Vec<String>> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Request to fetch or create a user by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        require_text(&mut errors, "username", &self.username);
        finish(errors)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
}

impl CreateCategoryRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        require_text(&mut errors, "name", &self.name);
        finish(errors)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
}

impl UpdateCategoryRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        require_optional_text(&mut errors, "name", self.name.as_deref());
        finish(errors)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub author_id: i32,
    pub category_id: i32,
}

impl CreatePostRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        require_text(&mut errors, "title", &self.title);
        require_text(&mut errors, "content", &self.content);
        require_id(&mut errors, "authorId", self.author_id);
        require_id(&mut errors, "categoryId", self.category_id);
        finish(errors)
    }
}

/// Partial post update. The author cannot be changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<i32>,
}

impl UpdatePostRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        require_optional_text(&mut errors, "title", self.title.as_deref());
        require_optional_text(&mut errors, "content", self.content.as_deref());
        if let Some(category_id) = self.category_id {
            require_id(&mut errors, "categoryId", category_id);
        }
        finish(errors)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub post_id: i32,
    pub author_id: i32,
    pub content: String,
}

impl CreateCommentRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        require_id(&mut errors, "postId", self.post_id);
        require_id(&mut errors, "authorId", self.author_id);
        require_text(&mut errors, "content", &self.content);
        finish(errors)
    }
}

/// Full comment replacement. `authorId` is the acting author and must
/// match the stored one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    pub post_id: i32,
    pub author_id: i32,
    pub content: String,
}

impl UpdateCommentRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        require_id(&mut errors, "postId", self.post_id);
        require_id(&mut errors, "authorId", self.author_id);
        require_text(&mut errors, "content", &self.content);
        finish(errors)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentRequest {
    pub author_id: i32,
}

impl DeleteCommentRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        require_id(&mut errors, "authorId", self.author_id);
        finish(errors)
    }
}

/// `?search=` query of the post listings. Missing means no text filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: Option<String>,
}

impl SearchQuery {
    pub fn text(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_request_reads_camel_case() {
        let req: CreatePostRequest = serde_json::from_str(
            r#"{"title":"t","content":"c","authorId":1,"categoryId":2}"#,
        )
        .unwrap();

        assert_eq!(req.author_id, 1);
        assert_eq!(req.category_id, 2);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_validation_collects_every_problem() {
        let req = CreatePostRequest {
            title: " ".into(),
            content: String::new(),
            author_id: 0,
            category_id: 1,
        };

        let errors = req.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&"authorId must be a positive id".to_string()));
    }

    #[test]
    fn test_partial_update_accepts_missing_fields() {
        let req: UpdatePostRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_ok());

        let req = UpdatePostRequest {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_category_rejects_blank_name() {
        let req = UpdateCategoryRequest {
            name: Some("".into()),
        };
        assert_eq!(req.validate().unwrap_err(), vec!["name must not be empty"]);
    }

    #[test]
    fn test_search_defaults_to_empty() {
        let query: SearchQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.text(), "");
    }
}
