//! Category repository.

use sqlx::PgPool;

use souk_core::CategoryId;

use super::RepositoryError;
use crate::models::Category;

/// Repository for category operations. Categories are admin-managed; names
/// are unique case-sensitively.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let categories: Vec<Category> =
            sqlx::query_as("SELECT id, name FROM category ORDER BY name")
                .fetch_all(self.pool)
                .await?;

        Ok(categories)
    }

    /// Get a category by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let category: Option<Category> =
            sqlx::query_as("SELECT id, name FROM category WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(category)
    }

    /// Insert a new category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name already exists.
    pub async fn create(&self, name: &str) -> Result<Category, RepositoryError> {
        let category: Category =
            sqlx::query_as("INSERT INTO category (name) VALUES ($1) RETURNING id, name")
                .bind(name)
                .fetch_one(self.pool)
                .await
                .map_err(|e| RepositoryError::from_sqlx(e, "category name already exists"))?;

        Ok(category)
    }

    /// Rename a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the id does not resolve, or
    /// `RepositoryError::Conflict` if the new name already exists.
    pub async fn rename(&self, id: CategoryId, name: &str) -> Result<Category, RepositoryError> {
        let category: Option<Category> =
            sqlx::query_as("UPDATE category SET name = $2 WHERE id = $1 RETURNING id, name")
                .bind(id)
                .bind(name)
                .fetch_optional(self.pool)
                .await
                .map_err(|e| RepositoryError::from_sqlx(e, "category name already exists"))?;

        category.ok_or(RepositoryError::NotFound)
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the id does not resolve, or
    /// `RepositoryError::Conflict` if products still reference it.
    pub async fn delete(&self, id: CategoryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM category WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict("category is still in use".to_string());
                }
                RepositoryError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
