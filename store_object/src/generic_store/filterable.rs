//! Generic store implementations
//!
//! This module provides filtered listing for the PostgreSQL store.

use super::core::GenericStore;
use crate::errors::StoreError;
use crate::traits::TableMetadata;
use crate::traits::{Filterable, StoreFilter};
use async_trait::async_trait;

#[async_trait]
impl<T> Filterable for GenericStore<T>
where
    T: TableMetadata + for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Unpin,
{
    async fn list_by_filter(&self, filter: &StoreFilter) -> Result<Vec<Self::Model>, StoreError> {
        filter.validate_fields(T::text_columns())?;

        let table_name = T::table_name();
        let (where_clause, values) = filter.build_where_clause();
        let primary_key = T::primary_key_field();

        // Pre-allocate capacity to avoid reallocations
        let mut full_query = String::with_capacity(
            32 + table_name.len() + where_clause.len() + primary_key.len(),
        );
        full_query.push_str("SELECT * FROM ");
        full_query.push_str(table_name);
        full_query.push_str(&where_clause);
        full_query.push_str(" ORDER BY ");
        full_query.push_str(primary_key);

        let mut query_builder = sqlx::query_as::<_, T>(&full_query);

        for value in values {
            query_builder = query_builder.bind(value);
        }

        query_builder
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(table_name, "list_by_filter", e))
    }
}
