use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::features::reports::{
    analytics as reports_analytics, charts as reports_charts, dtos as reports_dtos,
    handlers as reports_handlers,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Products
        products_handlers::list_products,
        products_handlers::get_product,
        // Reports
        reports_handlers::get_dashboard,
        reports_handlers::get_statistics,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Products
            products_dtos::ProductResponseDto,
            products_dtos::ProductPageDto,
            ApiResponse<products_dtos::ProductResponseDto>,
            ApiResponse<products_dtos::ProductPageDto>,
            // Reports
            reports_charts::ChartSpec,
            reports_analytics::HistogramBin,
            reports_analytics::BoxSummary,
            reports_dtos::CategoryPriceDto,
            reports_dtos::BrandCountDto,
            reports_dtos::DashboardSummaryDto,
            reports_dtos::StatisticsDto,
            ApiResponse<reports_dtos::DashboardSummaryDto>,
            ApiResponse<reports_dtos::StatisticsDto>,
        )
    ),
    tags(
        (name = "products", description = "Catalog listing and product detail"),
        (name = "reports", description = "Dashboard summary and catalog statistics"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Product Catalog API",
        version = "0.1.0",
        description = "Read-only JSON views of the product catalog",
    )
)]
pub struct ApiDoc;

/// Documents the session cookie that gates every JSON route
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "catalog_session",
                    "Issued on first visit; sign in with POST / before calling the API",
                ))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_json_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/products",
            "/api/products/{id}",
            "/api/dashboard",
            "/api/stats",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {}",
                expected
            );
        }
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Catalog".to_string(),
            version: "9.9.9".to_string(),
            description: "d".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Catalog");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
