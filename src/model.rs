//! Catalog entities

use serde::{Deserialize, Serialize};
use sqlx::Postgres;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use store_object::TableMetadata;

/// A product in the store catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Assigned by the backing store on insert; 0 until then
    pub product_id: i32,
    pub name: String,
    pub description: String,
    /// Price in minor currency units
    pub price: i64,
    pub category: String,
    pub photo_url: Option<String>,
}

impl Product {
    /// New, not yet stored product
    pub fn new(name: &str, description: &str, price: i64, category: &str) -> Self {
        Self {
            product_id: 0,
            name: name.to_string(),
            description: description.to_string(),
            price,
            category: category.to_string(),
            photo_url: None,
        }
    }

    pub fn with_photo_url(mut self, photo_url: &str) -> Self {
        self.photo_url = Some(photo_url.to_string());
        self
    }
}

const PRODUCT_COLUMNS: &[&str] = &[
    "product_id",
    "name",
    "description",
    "price",
    "category",
    "photo_url",
];

impl TableMetadata for Product {
    type Id = i32;

    fn table_name() -> &'static str {
        "products"
    }

    fn primary_key_field() -> &'static str {
        "product_id"
    }

    fn columns() -> &'static [&'static str] {
        PRODUCT_COLUMNS
    }

    fn text_columns() -> &'static [&'static str] {
        &["name", "description", "category", "photo_url"]
    }

    fn extract_id(&self) -> i32 {
        self.product_id
    }

    fn with_id(self, product_id: i32) -> Self {
        Self { product_id, ..self }
    }

    fn create_sql() -> &'static str {
        "INSERT INTO products (name, description, price, category, photo_url) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING product_id, name, description, price, category, photo_url"
    }

    fn update_sql() -> &'static str {
        "UPDATE products SET name = $1, description = $2, price = $3, category = $4, photo_url = $5 \
         WHERE product_id = $6 \
         RETURNING product_id, name, description, price, category, photo_url"
    }

    fn list_all_sql() -> &'static str {
        "SELECT product_id, name, description, price, category, photo_url FROM products ORDER BY product_id"
    }

    fn get_by_id_sql() -> &'static str {
        "SELECT product_id, name, description, price, category, photo_url FROM products WHERE product_id = $1"
    }

    fn delete_by_id_sql() -> &'static str {
        "DELETE FROM products WHERE product_id = $1"
    }

    fn count_all_sql() -> &'static str {
        "SELECT COUNT(*) AS total FROM products"
    }

    fn create_table_sql() -> String {
        "CREATE TABLE IF NOT EXISTS products (\
            product_id SERIAL PRIMARY KEY, \
            name TEXT NOT NULL, \
            description TEXT NOT NULL DEFAULT '', \
            price BIGINT NOT NULL, \
            category TEXT NOT NULL, \
            photo_url TEXT\
        )"
        .to_string()
    }

    fn create_indexes_sql() -> Vec<String> {
        vec!["CREATE INDEX IF NOT EXISTS idx_products_category ON products (category)".to_string()]
    }

    fn bind_create_params<'a>(&'a self, sql: &'a str) -> QueryAs<'a, Postgres, Self, PgArguments> {
        sqlx::query_as(sql)
            .bind(&self.name)
            .bind(&self.description)
            .bind(self.price)
            .bind(&self.category)
            .bind(&self.photo_url)
    }

    fn bind_update_params<'a>(&'a self, sql: &'a str) -> QueryAs<'a, Postgres, Self, PgArguments> {
        sqlx::query_as(sql)
            .bind(&self.name)
            .bind(&self.description)
            .bind(self.price)
            .bind(&self.category)
            .bind(&self.photo_url)
            .bind(self.product_id)
    }
}
