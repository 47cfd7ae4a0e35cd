//! Table metadata
//!
//! Static description of how a model maps onto a PostgreSQL table.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::Postgres;
use std::fmt::{Debug, Display};

/// Metadata about database table structure and operations
///
/// Implemented by hand for each model:
/// ```ignore
/// impl TableMetadata for Product {
///     type Id = i32;
///
///     fn table_name() -> &'static str { "products" }
///     fn primary_key_field() -> &'static str { "product_id" }
///     // ...
/// }
/// ```
pub trait TableMetadata:
    Clone + Send + Sync + Debug + Serialize + for<'de> Deserialize<'de>
{
    /// The type used for the primary key
    type Id: Clone
        + Send
        + Sync
        + Debug
        + Display
        + Ord
        + Unpin
        + for<'q> sqlx::Encode<'q, Postgres>
        + sqlx::Type<Postgres>;

    /// The table name in the database
    fn table_name() -> &'static str;

    /// Get the primary key field name
    fn primary_key_field() -> &'static str;

    /// Every column of the table, primary key included
    fn columns() -> &'static [&'static str];

    /// Text columns; the only ones `StoreFilter` may compare, since filter values bind as TEXT
    fn text_columns() -> &'static [&'static str];

    /// Extract ID from model instance
    fn extract_id(&self) -> Self::Id;

    /// Same record under another ID
    fn with_id(self, id: Self::Id) -> Self;

    /// INSERT ... RETURNING *; the primary key is generated by the database
    fn create_sql() -> &'static str;

    /// UPDATE ... WHERE <pk> = $n RETURNING *
    fn update_sql() -> &'static str;

    /// SQL for SELECT all operation, ordered by primary key
    fn list_all_sql() -> &'static str;

    /// SQL for SELECT by ID operation
    fn get_by_id_sql() -> &'static str;

    /// SQL for DELETE by ID operation
    fn delete_by_id_sql() -> &'static str;

    /// SQL for COUNT all operation; the count column is named `total`
    fn count_all_sql() -> &'static str;

    /// Generate CREATE TABLE SQL statement
    fn create_table_sql() -> String;

    /// Generate DROP TABLE SQL statement
    fn drop_table_sql() -> String {
        format!("DROP TABLE IF EXISTS {}", Self::table_name())
    }

    /// Generate CREATE INDEX SQL statements
    fn create_indexes_sql() -> Vec<String> {
        vec![]
    }

    /// Bind parameters for `create_sql`
    fn bind_create_params<'a>(
        &'a self,
        sql: &'a str,
    ) -> QueryAs<'a, Postgres, Self, PgArguments>
    where
        Self: Sized;

    /// Bind parameters for `update_sql`
    fn bind_update_params<'a>(
        &'a self,
        sql: &'a str,
    ) -> QueryAs<'a, Postgres, Self, PgArguments>
    where
        Self: Sized;
}
