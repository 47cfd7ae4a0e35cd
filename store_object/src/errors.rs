use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error in {table}.{operation}: {source}")]
    Database {
        table: &'static str,
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn database_operation(
        table: &'static str,
        operation: &'static str,
        source: sqlx::Error,
    ) -> Self {
        Self::Database {
            table,
            operation,
            source,
        }
    }
}
