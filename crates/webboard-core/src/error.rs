//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures surfaced by the services.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} with id {id} not found")]
    NotFound { entity_type: &'static str, id: i32 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, id: i32) -> Self {
        Self::NotFound { entity_type, id }
    }

    /// Convert a repository error where `NotFound` refers to a known entity.
    pub fn from_repo(err: RepoError, entity_type: &'static str, id: i32) -> Self {
        match err {
            RepoError::NotFound => Self::not_found(entity_type, id),
            other => other.into(),
        }
    }
}

/// Result type alias for service operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => DomainError::Conflict(msg),
            RepoError::NotFound => DomainError::Storage("record vanished".to_string()),
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Storage(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_becomes_conflict() {
        let err: DomainError = RepoError::Constraint("duplicate name".into()).into();
        assert!(matches!(err, DomainError::Conflict(msg) if msg == "duplicate name"));
    }

    #[test]
    fn test_from_repo_names_entity() {
        let err = DomainError::from_repo(RepoError::NotFound, "Comment", 4);
        assert!(matches!(
            err,
            DomainError::NotFound {
                entity_type: "Comment",
                id: 4
            }
        ));
        assert_eq!(err.to_string(), "Comment with id 4 not found");
    }

    #[test]
    fn test_from_repo_keeps_other_kinds() {
        let err = DomainError::from_repo(RepoError::Query("boom".into()), "Post", 1);
        assert!(matches!(err, DomainError::Storage(_)));
    }
}
