use crate::features::products::models::ProductInput;

use fake::{
    faker::{company::en::CompanyName, lorem::en::Sentence},
    Fake,
};

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

/// Fresh in-memory database with the schema applied.
///
/// A single connection that never idles out: every pooled connection to
/// `sqlite::memory:` would otherwise see its own empty database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");

    crate::core::database::run_migrations(&pool)
        .await
        .expect("migrations apply");

    pool
}

pub fn sample_input(
    product: &str,
    category: &str,
    brand: &str,
    sale_price: f64,
    rating: Option<f64>,
) -> ProductInput {
    ProductInput {
        product: product.to_string(),
        category: category.to_string(),
        sub_category: format!("{} Misc", category),
        brand: brand.to_string(),
        sale_price,
        market_price: sale_price + 10.0,
        product_type: "General".to_string(),
        rating,
        description: format!("{} by {}", product, brand),
    }
}

/// Product with generated names, for tests that only care about counts
pub fn fake_input() -> ProductInput {
    let brand: String = CompanyName().fake();
    let description: String = Sentence(3..8).fake();

    ProductInput {
        product: format!("{} {}", brand, (1..500).fake::<u32>()),
        category: "Snacks & Branded Foods".to_string(),
        sub_category: "Chocolates & Candies".to_string(),
        brand,
        sale_price: (10.0..500.0).fake::<f64>(),
        market_price: (500.0..900.0).fake::<f64>(),
        product_type: "Chocolates".to_string(),
        rating: Some((0.0..5.0).fake::<f64>()),
        description,
    }
}
