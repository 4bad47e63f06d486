//! Developer sandbox for the storefront session crates.
//!
//! ```text
//! storefront-sandbox query <catalog.json> <category> [sort] [key=v1,v2 ...]
//! storefront-sandbox facets <catalog.json> <category>
//! storefront-sandbox track <orders.json> <order-id>
//! storefront-sandbox cart <catalog.json> <product-id>...
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};

use storefront_catalog::{Catalog, CatalogQuery, SortOption};
use storefront_core::{OrderId, ProductId};
use storefront_orders::{AdminOrder, project};
use storefront_session::{
    InMemoryStore, JsonFileStore, KeyValueStore, SessionConfig, StorefrontSession, TracingNotifier,
};

fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = SessionConfig::from_env();

    match args.first().map(String::as_str) {
        Some("query") if args.len() >= 3 => query(&args[1], &args[2], &args[3..]),
        Some("facets") if args.len() == 3 => facets(&args[1], &args[2]),
        Some("track") if args.len() == 3 => track(&args[1], &args[2]),
        Some("cart") if args.len() >= 3 => match &config.storage_dir {
            Some(dir) => {
                let store = JsonFileStore::open(dir)
                    .with_context(|| format!("failed to open storage directory {}", dir.display()))?;
                cart(&config, store, &args[1], &args[2..])
            }
            None => cart(&config, InMemoryStore::new(), &args[1], &args[2..]),
        },
        _ => bail!(
            "usage: storefront-sandbox <query|facets|track|cart> ... (see crate docs for arguments)"
        ),
    }
}

fn load_catalog(path: impl AsRef<Path>) -> anyhow::Result<Catalog> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file {}", path.display()))?;
    Catalog::from_json(&json).with_context(|| format!("invalid catalog file {}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn query(catalog_path: &str, category: &str, rest: &[String]) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let mut query = CatalogQuery::for_category(category);

    for arg in rest {
        match arg.split_once('=') {
            Some((key, values)) => {
                query = query.with_attribute(key, values.split(',').map(str::trim).filter(|v| !v.is_empty()));
            }
            None => {
                let sort: SortOption = arg.parse().with_context(|| format!("unknown sort option {arg}"))?;
                query = query.sorted_by(sort);
            }
        }
    }

    let results = catalog.query(&query);
    tracing::info!(category, matched = results.len(), "catalog query");
    print_json(&results)
}

fn facets(catalog_path: &str, category: &str) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;
    print_json(&catalog.facets(category))
}

fn track(orders_path: &str, order_id: &str) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(orders_path)
        .with_context(|| format!("failed to read orders file {orders_path}"))?;
    let orders: Vec<AdminOrder> = serde_json::from_str(&json).context("invalid orders file")?;
    let id: OrderId = order_id.parse()?;

    let order = orders
        .iter()
        .find(|o| o.id == id)
        .with_context(|| format!("order {id} not found"))?;
    order.validate()?;

    print_json(&project(order))
}

fn cart<S: KeyValueStore>(
    config: &SessionConfig,
    store: S,
    catalog_path: &str,
    ids: &[String],
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let mut session = StorefrontSession::open(config, store, Arc::new(TracingNotifier));

    for raw in ids {
        let id: ProductId = raw.parse()?;
        let product = catalog
            .get(id)
            .with_context(|| format!("product {id} not in catalog"))?;
        session.cart_add(product.clone(), 1);
    }

    print_json(&session.checkout_summary())
}
