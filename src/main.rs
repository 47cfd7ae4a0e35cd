use anyhow::Context;
use sportstore::prelude::*;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sportstore::telemetry::init_tracing().context("installing tracing subscriber")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let clear_cache = args.iter().any(|arg| arg == "--clear-cache");
    let bypass_cache = args.iter().any(|arg| arg == "--no-cache");

    let config = AppConfig::load().context("loading sportstore.toml")?;
    let sportstore = SportStore::new(config)
        .await
        .context("connecting to the database")?;

    sportstore.auto_migrate::<Product>(false).await?;
    sportstore.health_check().await?;

    if bypass_cache {
        sportstore.settings().set(ENABLE_REDIS_CACHING, "false");
    }

    let products = sportstore.product_repository();

    if clear_cache {
        if let Some(eviction) = products.clear_cache() {
            eviction.await.context("waiting for cache eviction")?;
        }
        return Ok(());
    }

    // second read is served from the cache when caching is enabled
    let catalog = products.get_all_products().await?;
    info!(count = catalog.len(), "Catalog loaded");

    let catalog = products.get_all_products().await?;
    for product in &catalog {
        info!(
            product_id = product.product_id,
            name = %product.name,
            category = %product.category,
            price = product.price,
            "Product"
        );
    }

    Ok(())
}
