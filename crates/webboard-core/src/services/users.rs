use std::sync::Arc;

use crate::domain::User;
use crate::error::{DomainError, DomainResult, RepoError};
use crate::ports::Store;

/// User directory - get-or-create by name and lookup by id.
#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<dyn Store>,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Return the user named `username`, creating it if absent.
    ///
    /// An existing user is returned untouched.
    pub async fn get_or_create(&self, username: &str) -> DomainResult<User> {
        if username.trim().is_empty() {
            return Err(DomainError::Validation("username must not be empty".into()));
        }

        let tx = self.store.begin().await?;
        if let Some(user) = tx.users().find_by_username(username).await? {
            return Ok(user);
        }

        let inserted = tx.users().insert(User::new(username.to_string())).await;
        match inserted {
            Ok(user) => {
                tx.commit().await?;
                tracing::info!(user_id = user.id, username = %user.username, "User created");
                Ok(user)
            }
            Err(RepoError::Constraint(msg)) => {
                // A concurrent request inserted the same name first.
                drop(tx);
                tracing::debug!(username = %username, "Lost username race, re-reading");
                let tx = self.store.begin().await?;
                tx.users()
                    .find_by_username(username)
                    .await?
                    .ok_or(DomainError::Conflict(msg))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_by_id(&self, id: i32) -> DomainResult<User> {
        let tx = self.store.begin().await?;
        tx.users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }
}
