//! Database migration functionality
//!
//! This module provides automatic table creation for models managed by SportStore.

use crate::core::SportStore;
use crate::errors::SportStoreError;
use store_object::TableMetadata;
use tracing::info;

impl SportStore {
    /// Create table and indexes for a model
    /// If recreate is true, drops existing table first
    pub async fn auto_migrate<T>(&self, recreate: bool) -> Result<(), SportStoreError>
    where
        T: TableMetadata,
    {
        let table_name = T::table_name();

        if recreate {
            let drop_sql = T::drop_table_sql();
            info!(table = table_name, sql = %drop_sql, "Dropping table");
            sqlx::query(&drop_sql).execute(self.pool()).await?;
        }

        let create_table_sql = T::create_table_sql();
        info!(table = table_name, sql = %create_table_sql, "Creating table");
        sqlx::query(&create_table_sql).execute(self.pool()).await?;

        for index_sql in T::create_indexes_sql() {
            info!(table = table_name, sql = %index_sql, "Creating index");
            sqlx::query(&index_sql).execute(self.pool()).await?;
        }

        Ok(())
    }
}
