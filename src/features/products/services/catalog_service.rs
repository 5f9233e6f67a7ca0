use crate::core::error::{AppError, Result};
use crate::features::products::dtos::{ProductPageDto, ProductResponseDto};
use crate::features::products::models::{ProductInput, TextField};
use crate::features::products::store::ProductStore;
use crate::shared::types::{page_window, total_pages, PageQuery};

/// CRUD operations over the product catalog
pub struct CatalogService {
    store: ProductStore,
}

impl CatalogService {
    pub fn new(store: ProductStore) -> Self {
        Self { store }
    }

    /// One page of products plus the page links around it
    pub async fn list_page(&self, query: &PageQuery) -> Result<ProductPageDto> {
        let total_items = self.store.count().await?;
        let total_pages = total_pages(total_items);
        let page = query.page();

        let products = self.store.list(query.limit(), query.offset()).await?;

        Ok(ProductPageDto {
            products: products.into_iter().map(Into::into).collect(),
            page,
            total_pages,
            total_items,
            page_range: page_window(page, total_pages),
        })
    }

    pub async fn get(&self, id: i64) -> Result<ProductResponseDto> {
        self.store
            .get(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    /// Insert and return the new product id
    pub async fn create(&self, input: ProductInput) -> Result<i64> {
        let id = self.store.insert(&input).await?;

        tracing::info!("Product created: id={}, brand={}", id, input.brand);

        Ok(id)
    }

    /// Full-record replace. A missing id is not an error; returns whether a row changed.
    pub async fn update(&self, id: i64, input: ProductInput) -> Result<bool> {
        let updated = self.store.update(id, &input).await?;

        if updated {
            tracing::info!("Product updated: id={}", id);
        } else {
            tracing::warn!("Update skipped, product {} does not exist", id);
        }

        Ok(updated)
    }

    /// Idempotent delete; returns whether a row was removed
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let deleted = self.store.delete(id).await?;

        if deleted {
            tracing::info!("Product deleted: id={}", id);
        } else {
            tracing::warn!("Delete skipped, product {} does not exist", id);
        }

        Ok(deleted)
    }

    /// Known brands for the add form's suggestion list
    pub async fn brand_suggestions(&self) -> Result<Vec<String>> {
        self.store.distinct(TextField::Brand).await
    }
}
