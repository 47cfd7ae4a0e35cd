use crate::errors::RepositoryError;
use crate::model::Product;
use async_trait::async_trait;
use tokio::task::JoinHandle;

/// Catalog operations consumed by the request-handling layer
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// The full catalog, read through the distributed cache when caching is enabled
    async fn get_all_products(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Always read from the backing store
    async fn find_product_by_id(&self, product_id: i32) -> Result<Option<Product>, RepositoryError>;

    /// Exact, case-sensitive category match; always read from the backing store
    async fn find_products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, RepositoryError>;

    /// Insert a product and return it with its assigned id
    async fn create(&self, product: Product) -> Result<Product, RepositoryError>;

    /// Replace the stored product with the same id
    async fn update(&self, product: Product) -> Result<Product, RepositoryError>;

    async fn delete(&self, product_id: i32) -> Result<(), RepositoryError>;

    /// Start evicting the cached product list and return without waiting.
    ///
    /// Works whether or not caching is enabled. Failures are logged only.
    /// The handle may be dropped; `None` means no tokio runtime was available
    /// and nothing was issued.
    fn clear_cache(&self) -> Option<JoinHandle<()>>;
}
