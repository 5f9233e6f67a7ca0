use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::core::error::{AppError, Result};
use crate::features::products::models::ProductInput;
use crate::features::products::store::ProductStore;

/// Outcome of one seed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub imported: u64,
    pub skipped: u64,
}

#[derive(Debug, Deserialize)]
struct SeedRecord {
    product: String,
    category: String,
    sub_category: String,
    brand: String,
    sale_price: f64,
    market_price: f64,
    #[serde(rename = "type")]
    product_type: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    rating: Option<f64>,
    description: String,
}

impl SeedRecord {
    /// Name of the first price column that is not a finite, non-negative number
    fn invalid_price(&self) -> Option<&'static str> {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !valid(self.sale_price) {
            Some("sale_price")
        } else if !valid(self.market_price) {
            Some("market_price")
        } else {
            None
        }
    }
}

impl From<SeedRecord> for ProductInput {
    fn from(r: SeedRecord) -> Self {
        Self {
            product: r.product,
            category: r.category,
            sub_category: r.sub_category,
            brand: r.brand,
            sale_price: r.sale_price,
            market_price: r.market_price,
            product_type: r.product_type,
            rating: r.rating.filter(|v| v.is_finite()),
            description: r.description,
        }
    }
}

/// First-boot import of the bundled product CSV
pub struct SeedService {
    store: ProductStore,
}

impl SeedService {
    pub fn new(store: ProductStore) -> Self {
        Self { store }
    }

    /// Load `path` into the store, but only when the store holds no products.
    ///
    /// A missing file is not fatal: the catalog simply starts empty.
    pub async fn import_if_empty(&self, path: &Path) -> Result<SeedSummary> {
        let existing = self.store.count().await?;
        if existing > 0 {
            tracing::debug!("Seed import skipped, {} products already stored", existing);
            return Ok(SeedSummary::default());
        }

        if !path.exists() {
            tracing::warn!(
                "Seed file {} not found, starting with an empty catalog",
                path.display()
            );
            return Ok(SeedSummary::default());
        }

        let file = std::fs::File::open(path).map_err(|e| {
            AppError::Seed(format!("cannot open {}: {}", path.display(), e))
        })?;

        let (inputs, skipped) = parse_records(file)?;
        let imported = self.store.insert_many(&inputs).await?;

        tracing::info!(
            "Seed import from {} finished: {} imported, {} skipped",
            path.display(),
            imported,
            skipped
        );

        Ok(SeedSummary { imported, skipped })
    }
}

/// Parse CSV rows into inputs, skipping rows that do not fit the schema.
///
/// Fails only when the header itself cannot be read.
fn parse_records<R: Read>(reader: R) -> Result<(Vec<ProductInput>, u64)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .headers()
        .map_err(|e| AppError::Seed(format!("unreadable header: {}", e)))?;

    let mut inputs = Vec::new();
    let mut skipped = 0;

    for (index, row) in csv_reader.deserialize::<SeedRecord>().enumerate() {
        // +2: header line plus 1-based numbering
        let line = index + 2;
        match row {
            Ok(record) => match record.invalid_price() {
                None => inputs.push(record.into()),
                Some(column) => {
                    skipped += 1;
                    tracing::warn!("Skipping seed row {}: invalid {}", line, column);
                }
            },
            Err(e) => {
                skipped += 1;
                tracing::warn!("Skipping seed row {}: {}", line, e);
            }
        }
    }

    Ok((inputs, skipped))
}
