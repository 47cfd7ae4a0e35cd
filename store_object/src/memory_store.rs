//! In-memory store
//!
//! A process-local `StoreObject` with sequential identity assignment. Useful
//! wherever a live database is not available; it also counts the calls it
//! serves and can be switched offline to exercise storage failures.

use crate::errors::StoreError;
use crate::id_type::SequentialId;
use crate::traits::TableMetadata;
use crate::traits::{Filterable, StoreFilter, StoreObject};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Calls served by a `MemoryStore`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub reads: usize,
    pub writes: usize,
}

#[derive(Debug)]
struct MemoryTable<T: TableMetadata> {
    rows: BTreeMap<T::Id, T>,
    next_id: Option<T::Id>,
}

#[derive(Debug)]
pub struct MemoryStore<T: TableMetadata> {
    table: RwLock<MemoryTable<T>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    available: AtomicBool,
}

impl<T> MemoryStore<T>
where
    T: TableMetadata,
    T::Id: SequentialId,
{
    pub fn new() -> Self {
        Self {
            table: RwLock::new(MemoryTable {
                rows: BTreeMap::new(),
                next_id: Some(T::Id::first()),
            }),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            available: AtomicBool::new(true),
        }
    }

    /// Store pre-populated with `records`, each given a fresh ID in order
    pub async fn with_records(records: impl IntoIterator<Item = T>) -> Result<Self, StoreError> {
        let store = Self::new();
        for record in records {
            store.create(record).await?;
        }
        store.reset_stats();
        Ok(store)
    }

    /// Toggle availability; while offline every call fails with `StoreError::Unavailable`
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            reads: self.reads.load(Ordering::SeqCst),
            writes: self.writes.load(Ordering::SeqCst),
        }
    }

    pub fn reset_stats(&self) {
        self.reads.store(0, Ordering::SeqCst);
        self.writes.store(0, Ordering::SeqCst);
    }

    fn begin_read(&self) -> Result<(), StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.ensure_available()
    }

    fn begin_write(&self) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.ensure_available()
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable(format!(
                "{} store is offline",
                T::table_name()
            )))
        }
    }
}

impl<T> Default for MemoryStore<T>
where
    T: TableMetadata,
    T::Id: SequentialId,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Compare a serialized field with a filter value; strings compare verbatim
fn field_matches(record: &serde_json::Value, field: &str, expected: &str) -> bool {
    match record.get(field) {
        Some(serde_json::Value::String(actual)) => actual == expected,
        Some(serde_json::Value::Null) | None => false,
        Some(other) => other.to_string() == expected,
    }
}

#[async_trait]
impl<T> StoreObject for MemoryStore<T>
where
    T: TableMetadata,
    T::Id: SequentialId,
{
    type Model = T;
    type Id = T::Id;

    async fn create(&self, data: Self::Model) -> Result<Self::Model, StoreError> {
        self.begin_write()?;
        let mut table = self.table.write().await;

        let id = table.next_id.ok_or_else(|| {
            StoreError::Validation(format!("{} id sequence exhausted", T::table_name()))
        })?;
        table.next_id = id.successor();

        let created = data.with_id(id);
        table.rows.insert(id, created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: &Self::Id) -> Result<Option<Self::Model>, StoreError> {
        self.begin_read()?;
        Ok(self.table.read().await.rows.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Self::Model>, StoreError> {
        self.begin_read()?;
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn update(&self, data: Self::Model) -> Result<Option<Self::Model>, StoreError> {
        self.begin_write()?;
        let mut table = self.table.write().await;

        match table.rows.get_mut(&data.extract_id()) {
            Some(row) => {
                *row = data.clone();
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &Self::Id) -> Result<bool, StoreError> {
        self.begin_write()?;
        Ok(self.table.write().await.rows.remove(id).is_some())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        self.begin_read()?;
        Ok(self.table.read().await.rows.len() as i64)
    }
}

#[async_trait]
impl<T> Filterable for MemoryStore<T>
where
    T: TableMetadata,
    T::Id: SequentialId,
{
    async fn list_by_filter(&self, filter: &StoreFilter) -> Result<Vec<Self::Model>, StoreError> {
        self.begin_read()?;
        filter.validate_fields(T::text_columns())?;

        let table = self.table.read().await;
        let mut matches = Vec::new();

        for row in table.rows.values() {
            let value = serde_json::to_value(row)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            if filter
                .conditions
                .iter()
                .all(|(field, expected)| field_matches(&value, field, expected))
            {
                matches.push(row.clone());
            }
        }

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use sqlx::postgres::PgArguments;
    use sqlx::query::QueryAs;
    use sqlx::Postgres;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
    struct Item {
        id: i32,
        kind: String,
    }

    impl Item {
        fn new(kind: &str) -> Self {
            Self {
                id: 0,
                kind: kind.to_string(),
            }
        }
    }

    impl TableMetadata for Item {
        type Id = i32;

        fn table_name() -> &'static str {
            "items"
        }
        fn primary_key_field() -> &'static str {
            "id"
        }
        fn columns() -> &'static [&'static str] {
            &["id", "kind"]
        }
        fn text_columns() -> &'static [&'static str] {
            &["kind"]
        }
        fn extract_id(&self) -> i32 {
            self.id
        }
        fn with_id(self, id: i32) -> Self {
            Self { id, ..self }
        }
        fn create_sql() -> &'static str {
            "INSERT INTO items (kind) VALUES ($1) RETURNING *"
        }
        fn update_sql() -> &'static str {
            "UPDATE items SET kind = $1 WHERE id = $2 RETURNING *"
        }
        fn list_all_sql() -> &'static str {
            "SELECT * FROM items ORDER BY id"
        }
        fn get_by_id_sql() -> &'static str {
            "SELECT * FROM items WHERE id = $1"
        }
        fn delete_by_id_sql() -> &'static str {
            "DELETE FROM items WHERE id = $1"
        }
        fn count_all_sql() -> &'static str {
            "SELECT COUNT(*) AS total FROM items"
        }
        fn create_table_sql() -> String {
            "CREATE TABLE IF NOT EXISTS items (id SERIAL PRIMARY KEY, kind TEXT NOT NULL)".to_string()
        }
        fn bind_create_params<'a>(&'a self, sql: &'a str) -> QueryAs<'a, Postgres, Self, PgArguments> {
            sqlx::query_as(sql).bind(&self.kind)
        }
        fn bind_update_params<'a>(&'a self, sql: &'a str) -> QueryAs<'a, Postgres, Self, PgArguments> {
            sqlx::query_as(sql).bind(&self.kind).bind(self.id)
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = MemoryStore::<Item>::new();

        let first = store.create(Item::new("a")).await.unwrap();
        let second = store.create(Item::new("b")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_list_all_ordered_by_id() {
        let store = MemoryStore::with_records(vec![Item::new("x"), Item::new("y"), Item::new("z")])
            .await
            .unwrap();

        let kinds: Vec<_> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.kind)
            .collect();
        assert_eq!(kinds, vec!["x", "y", "z"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_id() {
        let store = MemoryStore::<Item>::new();
        let ghost = Item::new("ghost").with_id(42);

        assert_eq!(store.update(ghost).await.unwrap(), None);
        assert!(!store.delete(&42).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let store = MemoryStore::with_records(vec![Item::new("old")]).await.unwrap();

        let replaced = store.update(Item::new("new").with_id(1)).await.unwrap();
        assert_eq!(replaced.map(|item| item.kind).as_deref(), Some("new"));
        assert_eq!(store.get_by_id(&1).await.unwrap().unwrap().kind, "new");
    }

    #[tokio::test]
    async fn test_filter_is_exact_and_case_sensitive() {
        let store = MemoryStore::with_records(vec![
            Item::new("Bikes"),
            Item::new("bikes"),
            Item::new("Bikes "),
        ])
        .await
        .unwrap();

        let found = store
            .list_by_filter(&StoreFilter::new().add_condition("kind", "Bikes"))
            .await
            .unwrap();
        assert_eq!(found, vec![Item::new("Bikes").with_id(1)]);

    }

    #[tokio::test]
    async fn test_filter_on_non_text_column_rejected() {
        let store = MemoryStore::with_records(vec![Item::new("Bikes")]).await.unwrap();

        let result = store
            .list_by_filter(&StoreFilter::new().add_condition("id", "1"))
            .await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_offline_store_fails_every_call() {
        let store = MemoryStore::<Item>::new();
        store.set_available(false);

        assert!(matches!(store.list_all().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(store.create(Item::new("a")).await, Err(StoreError::Unavailable(_))));

        store.set_available(true);
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stats_count_reads_and_writes() {
        let store = MemoryStore::<Item>::new();
        store.create(Item::new("a")).await.unwrap();
        store.list_all().await.unwrap();
        store.get_by_id(&1).await.unwrap();

        assert_eq!(store.stats(), StoreStats { reads: 2, writes: 1 });
        store.reset_stats();
        assert_eq!(store.stats(), StoreStats::default());
    }
}
