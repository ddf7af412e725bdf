use std::sync::Arc;

use crate::domain::{Category, CategoryChanges};
use crate::error::{DomainError, DomainResult};
use crate::ports::{RowLock, Store};

fn check_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::Validation("category name must not be empty".into()));
    }
    Ok(())
}

/// Category catalog - CRUD over uniquely named categories.
#[derive(Clone)]
pub struct CategoryCatalog {
    store: Arc<dyn Store>,
}

impl CategoryCatalog {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Create a category. A duplicate name fails with `Conflict`.
    pub async fn create(&self, name: &str) -> DomainResult<Category> {
        check_name(name)?;
        let tx = self.store.begin().await?;
        let category = tx.categories().insert(Category::new(name.to_string())).await?;
        tx.commit().await?;

        tracing::info!(category_id = category.id, name = %category.name, "Category created");
        Ok(category)
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Category>> {
        let tx = self.store.begin().await?;
        Ok(tx.categories().find_all().await?)
    }

    pub async fn get_by_id(&self, id: i32) -> DomainResult<Category> {
        let tx = self.store.begin().await?;
        tx.categories()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", id))
    }

    pub async fn update(&self, id: i32, changes: CategoryChanges) -> DomainResult<Category> {
        if let Some(name) = &changes.name {
            check_name(name)?;
        }

        let tx = self.store.begin().await?;
        let mut category = tx
            .categories()
            .find_locked(id, RowLock::Update)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", id))?;

        category.apply(changes);
        let category = tx
            .categories()
            .update(category)
            .await
            .map_err(|e| DomainError::from_repo(e, "Category", id))?;
        tx.commit().await?;

        Ok(category)
    }

    /// Delete a category. Fails with `Conflict` while posts still use it.
    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        let tx = self.store.begin().await?;
        tx.categories()
            .delete(id)
            .await
            .map_err(|e| DomainError::from_repo(e, "Category", id))?;
        tx.commit().await?;

        tracing::info!(category_id = id, "Category deleted");
        Ok(())
    }
}
