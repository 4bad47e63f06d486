use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use storefront_catalog::{CatalogQuery, Product, SortOption};
use storefront_core::ProductId;

const BRANDS: [&str; 5] = ["ASUS", "MSI", "Gigabyte", "Palit", "Sapphire"];

fn synthetic_catalog(size: u64) -> Vec<Product> {
    (0..size)
        .map(|i| {
            let category = if i % 3 == 0 { "cpu" } else { "gpu" };
            Product::new(
                ProductId::new(size - i),
                format!("item {i}"),
                category,
                BRANDS[(i % 5) as usize],
                Decimal::from(100 + (i * 37) % 1900),
            )
            .with_spec("memory", ((i % 4 + 1) * 4) as f64)
            .with_reviews((i * 13 % 200) as u32, Decimal::ZERO)
        })
        .collect()
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_query");

    for size in [50u64, 500, 5_000] {
        let products = synthetic_catalog(size);
        let query = CatalogQuery::for_category("gpu")
            .with_attribute("brand", ["ASUS", "MSI"])
            .with_attribute("specs.memory", ["8", "16"])
            .with_price(Decimal::from(200), Decimal::from(1500))
            .sorted_by(SortOption::PriceAsc);

        group.bench_with_input(BenchmarkId::new("filter_and_sort", size), &products, |b, products| {
            b.iter(|| query.run(black_box(products)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_query);
criterion_main!(benches);
