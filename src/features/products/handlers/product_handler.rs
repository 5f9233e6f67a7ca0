use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::products::dtos::{ProductPageDto, ProductResponseDto};
use crate::features::products::handlers::ProductState;
use crate::shared::types::{ApiResponse, Meta, PageQuery};

/// List one page of products
#[utoipa::path(
    get,
    path = "/api/products",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of products", body = ApiResponse<ProductPageDto>),
        (status = 401, description = "Session not signed in")
    ),
    security(("session_cookie" = [])),
    tag = "products"
)]
pub async fn list_products(
    State(state): State<ProductState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<ProductPageDto>>> {
    let page = state.catalog_service.list_page(&query).await?;
    let meta = Meta {
        total: page.total_items,
    };
    Ok(Json(ApiResponse::success(Some(page), None, Some(meta))))
}

/// Get product by ID
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponseDto>),
        (status = 401, description = "Session not signed in"),
        (status = 404, description = "Product not found")
    ),
    security(("session_cookie" = [])),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<ProductState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let product = state.catalog_service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}
