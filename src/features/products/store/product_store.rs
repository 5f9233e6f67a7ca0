use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::products::models::{NumericField, Product, ProductInput, TextField};

const PRODUCT_COLUMNS: &str = "product_id, product, category, sub_category, brand, \
     sale_price, market_price, type, rating, description";

/// Number of records sharing one value of a text column
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct GroupCount {
    pub value: String,
    pub count: i64,
}

/// Mean of a numeric column for one value of a text column
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct GroupMean {
    pub value: String,
    pub mean: f64,
}

/// Persistence and aggregate queries over the `products` table.
///
/// Every call borrows a pooled connection for the duration of one query
/// (or one transaction) and hands it back on all exit paths.
#[derive(Clone)]
pub struct ProductStore {
    pool: SqlitePool,
}

impl ProductStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count products: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Insert a product and return its newly assigned id
    pub async fn insert(&self, input: &ProductInput) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO products
                (product, category, sub_category, brand, sale_price,
                 market_price, type, rating, description)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.product)
        .bind(&input.category)
        .bind(&input.sub_category)
        .bind(&input.brand)
        .bind(input.sale_price)
        .bind(input.market_price)
        .bind(&input.product_type)
        .bind(input.rating)
        .bind(&input.description)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert product: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(result.last_insert_rowid())
    }

    /// Insert many products in one transaction; nothing is kept if any insert fails
    pub async fn insert_many(&self, inputs: &[ProductInput]) -> Result<u64> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        for input in inputs {
            sqlx::query(
                r#"
                INSERT INTO products
                    (product, category, sub_category, brand, sale_price,
                     market_price, type, rating, description)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&input.product)
            .bind(&input.category)
            .bind(&input.sub_category)
            .bind(&input.brand)
            .bind(input.sale_price)
            .bind(input.market_price)
            .bind(&input.product_type)
            .bind(input.rating)
            .bind(&input.description)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert product during bulk import: {:?}", e);
                AppError::Database(e)
            })?;
        }

        tx.commit().await.map_err(AppError::Database)?;

        Ok(inputs.len() as u64)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE product_id = ?", PRODUCT_COLUMNS);

        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get product {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    /// One page of products, ascending by id
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Product>> {
        let sql = format!(
            "SELECT {} FROM products ORDER BY product_id ASC LIMIT ? OFFSET ?",
            PRODUCT_COLUMNS
        );

        sqlx::query_as::<_, Product>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list products: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Every product, ascending by id
    pub async fn list_all(&self) -> Result<Vec<Product>> {
        let sql = format!(
            "SELECT {} FROM products ORDER BY product_id ASC",
            PRODUCT_COLUMNS
        );

        sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load all products: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Replace every mutable field. Returns false when no row has that id.
    pub async fn update(&self, id: i64, input: &ProductInput) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE products SET
                product = ?, category = ?, sub_category = ?, brand = ?,
                sale_price = ?, market_price = ?, type = ?, rating = ?, description = ?
            WHERE product_id = ?
            "#,
        )
        .bind(&input.product)
        .bind(&input.category)
        .bind(&input.sub_category)
        .bind(&input.brand)
        .bind(input.sale_price)
        .bind(input.market_price)
        .bind(&input.product_type)
        .bind(input.rating)
        .bind(&input.description)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update product {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns false when no row has that id
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE product_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete product {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Mean of a numeric column over non-null values; `None` when there are none
    pub async fn average(&self, field: NumericField) -> Result<Option<f64>> {
        let sql = format!("SELECT AVG({}) FROM products", field.column());

        sqlx::query_scalar::<_, Option<f64>>(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to average {}: {:?}", field.column(), e);
                AppError::Database(e)
            })
    }

    /// Record count per value, most frequent first.
    /// Equal counts keep first-seen order (lowest product id).
    pub async fn group_count(&self, field: TextField) -> Result<Vec<GroupCount>> {
        let column = field.column();
        let sql = format!(
            "SELECT {column} AS value, COUNT(*) AS count FROM products \
             GROUP BY {column} ORDER BY count DESC, MIN(product_id) ASC"
        );

        sqlx::query_as::<_, GroupCount>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to group-count {}: {:?}", column, e);
                AppError::Database(e)
            })
    }

    /// Mean of `measure` per value of `field`, highest mean first
    pub async fn group_mean(
        &self,
        field: TextField,
        measure: NumericField,
    ) -> Result<Vec<GroupMean>> {
        let column = field.column();
        let measure_column = measure.column();
        let sql = format!(
            "SELECT {column} AS value, AVG({measure_column}) AS mean FROM products \
             WHERE {measure_column} IS NOT NULL \
             GROUP BY {column} ORDER BY mean DESC, MIN(product_id) ASC"
        );

        sqlx::query_as::<_, GroupMean>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to group-mean {} by {}: {:?}",
                    measure_column,
                    column,
                    e
                );
                AppError::Database(e)
            })
    }

    /// Distinct values of a text column, alphabetical
    pub async fn distinct(&self, field: TextField) -> Result<Vec<String>> {
        let column = field.column();
        let sql = format!("SELECT DISTINCT {column} FROM products ORDER BY {column} ASC");

        sqlx::query_scalar::<_, String>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list distinct {}: {:?}", column, e);
                AppError::Database(e)
            })
    }
}
