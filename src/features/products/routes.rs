use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::products::handlers::{self, ProductState};
use crate::features::products::services::CatalogService;

/// HTML pages for browsing and editing the catalog
///
/// Session gating is applied by the caller
pub fn page_routes(catalog_service: Arc<CatalogService>) -> Router {
    let state = ProductState { catalog_service };

    Router::new()
        .route("/view_data", get(handlers::view_data))
        .route("/add", get(handlers::add_form).post(handlers::add_product))
        .route("/edit/{id}", get(handlers::edit_form))
        .route("/update/{id}", post(handlers::update_product))
        .route("/delete/{id}", get(handlers::delete_product))
        .with_state(state)
}

/// Read-only JSON views of the catalog
pub fn api_routes(catalog_service: Arc<CatalogService>) -> Router {
    let state = ProductState { catalog_service };

    Router::new()
        .route("/api/products", get(handlers::list_products))
        .route("/api/products/{id}", get(handlers::get_product))
        .with_state(state)
}
