mod page_handler;
mod product_handler;

use std::sync::Arc;

use crate::features::products::services::CatalogService;

pub use page_handler::*;
pub use product_handler::*;

/// State for product handlers
#[derive(Clone)]
pub struct ProductState {
    pub catalog_service: Arc<CatalogService>,
}
