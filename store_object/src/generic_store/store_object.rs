//! Generic store implementations
//!
//! This module provides the PostgreSQL `StoreObject` implementation.

use super::core::GenericStore;
use crate::errors::StoreError;
use crate::traits::TableMetadata;
use crate::traits::StoreObject;
use async_trait::async_trait;
use sqlx::Row;

#[async_trait]
impl<T> StoreObject for GenericStore<T>
where
    T: TableMetadata + for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Unpin,
{
    type Model = T;
    type Id = T::Id;

    async fn create(&self, data: Self::Model) -> Result<Self::Model, StoreError> {
        let created = data
            .bind_create_params(T::create_sql())
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "create", e))?;

        tracing::debug!(table = T::table_name(), id = %created.extract_id(), "record created");
        Ok(created)
    }

    async fn get_by_id(&self, id: &Self::Id) -> Result<Option<Self::Model>, StoreError> {
        sqlx::query_as::<_, T>(T::get_by_id_sql())
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "get_by_id", e))
    }

    async fn list_all(&self) -> Result<Vec<Self::Model>, StoreError> {
        sqlx::query_as::<_, T>(T::list_all_sql())
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "list_all", e))
    }

    async fn update(&self, data: Self::Model) -> Result<Option<Self::Model>, StoreError> {
        data.bind_update_params(T::update_sql())
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "update", e))
    }

    async fn delete(&self, id: &Self::Id) -> Result<bool, StoreError> {
        let result = sqlx::query(T::delete_by_id_sql())
            .bind(id)
            .execute(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let result = sqlx::query(T::count_all_sql())
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "count", e))?;

        let total: i64 = result.get("total");
        Ok(total)
    }
}
