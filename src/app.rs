use std::sync::Arc;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::Router;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::core::middleware;
use crate::features::products::{routes as products_routes, CatalogService};
use crate::features::reports::{routes as reports_routes, ReportService};
use crate::features::session::{routes as session_routes, SessionStore};

/// Shared services handed to the router
#[derive(Clone)]
pub struct AppServices {
    pub catalog_service: Arc<CatalogService>,
    pub report_service: Arc<ReportService>,
    pub session_store: Arc<SessionStore>,
}

async fn health_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}

/// Assemble every route with its gate and the shared middleware stack
pub fn build_router(services: AppServices, swagger: Router) -> Router {
    // HTML pages: anonymous sessions are redirected to the sign-in page
    let page_routes = Router::new()
        .merge(products_routes::page_routes(Arc::clone(
            &services.catalog_service,
        )))
        .merge(reports_routes::page_routes(Arc::clone(
            &services.report_service,
        )))
        .route_layer(from_fn(middleware::require_login));

    // JSON routes: anonymous sessions get a 401 envelope
    let api_routes = Router::new()
        .merge(products_routes::api_routes(Arc::clone(
            &services.catalog_service,
        )))
        .merge(reports_routes::api_routes(Arc::clone(
            &services.report_service,
        )))
        .route_layer(from_fn(middleware::require_login_api));

    let session_scoped = Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .merge(session_routes::routes())
        .layer(from_fn_with_state(
            services.session_store,
            middleware::session_middleware,
        ));

    // Health probes and API docs never touch the session store
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    Router::new()
        .merge(session_scoped)
        .merge(swagger)
        .merge(health_route)
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SessionConfig;
    use crate::features::products::{ProductStore, SeedService};
    use crate::shared::test_helpers::test_pool;
    use axum::http::{header, StatusCode};
    use axum_test::TestServer;
    use serde_json::Value;
    use std::io::Write;

    async fn server_with_store() -> (TestServer, ProductStore) {
        let store = ProductStore::new(test_pool().await);
        let services = AppServices {
            catalog_service: Arc::new(CatalogService::new(store.clone())),
            report_service: Arc::new(ReportService::new(store.clone())),
            session_store: Arc::new(SessionStore::new(SessionConfig::default())),
        };

        let server = TestServer::builder()
            .save_cookies()
            .build(build_router(services, Router::new()))
            .unwrap();

        (server, store)
    }

    async fn signed_in() -> (TestServer, ProductStore) {
        let (server, store) = server_with_store().await;
        server.get("/").await.assert_status_ok();
        server
            .post("/")
            .form(&[("username", "anyone"), ("password", "")])
            .await
            .assert_status_see_other();
        (server, store)
    }

    fn product_form<'a>(product: &'a str, brand: &'a str, rating: &'a str) -> Vec<(&'a str, &'a str)> {
        vec![
            ("product", product),
            ("category", "Beverages"),
            ("sub_category", "Tea"),
            ("brand", brand),
            ("sale_price", "120"),
            ("market_price", "150"),
            ("type", "Green Tea"),
            ("rating", rating),
            ("description", "Loose leaves"),
        ]
    }

    #[tokio::test]
    async fn test_health_is_public_and_sessionless() {
        let (server, _) = server_with_store().await;

        let response = server.get("/health").await;
        response.assert_status_ok();
        assert!(!response.headers().contains_key(header::SET_COOKIE));
    }

    #[tokio::test]
    async fn test_first_visit_sets_session_cookie() {
        let (server, _) = server_with_store().await;

        let response = server.get("/").await;
        response.assert_status_ok();

        let cookie = response.header(header::SET_COOKIE);
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("catalog_session="));
        assert!(cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn test_anonymous_pages_redirect_to_login() {
        let (server, _) = server_with_store().await;

        for path in ["/dashboard", "/view_data", "/add", "/edit/1", "/delete/1", "/stats"] {
            let response = server.get(path).await;
            response.assert_status_see_other();
            assert_eq!(response.header(header::LOCATION), "/", "{}", path);
        }
    }

    #[tokio::test]
    async fn test_anonymous_api_is_unauthorized() {
        let (server, _) = server_with_store().await;

        let response = server.get("/api/products").await;
        response.assert_status_unauthorized();
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_login_accepts_empty_payload() {
        let (server, _) = server_with_store().await;
        server.get("/").await;

        let response = server.post("/").await;
        response.assert_status_see_other();
        assert_eq!(response.header(header::LOCATION), "/dashboard");

        server.get("/dashboard").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_logout_then_dashboard_redirects() {
        let (server, _) = signed_in().await;
        server.get("/dashboard").await.assert_status_ok();

        let response = server.get("/logout").await;
        response.assert_status_see_other();
        assert_eq!(response.header(header::LOCATION), "/");

        let response = server.get("/dashboard").await;
        response.assert_status_see_other();
        assert_eq!(response.header(header::LOCATION), "/");
    }

    #[tokio::test]
    async fn test_add_product_flow() {
        let (server, store) = signed_in().await;

        server.get("/add").await.assert_status_ok();

        let response = server
            .post("/add")
            .form(&product_form("Darjeeling", "Acme", "4.5"))
            .await;
        response.assert_status_see_other();
        assert_eq!(response.header(header::LOCATION), "/view_data");

        let page = server.get("/view_data").await;
        page.assert_status_ok();
        let html = page.text();
        assert!(html.contains("Darjeeling"));
        assert!(html.contains("Product added successfully!"));

        // The notice is shown once
        assert!(!server
            .get("/view_data")
            .await
            .text()
            .contains("Product added successfully!"));

        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_invalid_submission_rerenders_form() {
        let (server, store) = signed_in().await;

        let response = server
            .post("/add")
            .form(&product_form("Darjeeling", "Acme", "9"))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let html = response.text();
        assert!(html.contains("rating: must be a number between 0 and 5"));
        assert!(html.contains("value=\"Darjeeling\""));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_edit_update_delete_flow() {
        let (server, store) = signed_in().await;
        server
            .post("/add")
            .form(&product_form("Assam", "Acme", "3.5"))
            .await;
        let id = store.list(1, 0).await.unwrap()[0].product_id;

        let edit = server.get(&format!("/edit/{}", id)).await;
        edit.assert_status_ok();
        assert!(edit.text().contains("value=\"Assam\""));

        server
            .post(&format!("/update/{}", id))
            .form(&product_form("Assam Gold", "Acme", "4.0"))
            .await
            .assert_status_see_other();
        assert_eq!(store.get(id).await.unwrap().unwrap().product, "Assam Gold");

        server
            .get(&format!("/delete/{}", id))
            .await
            .assert_status_see_other();
        assert!(store.get(id).await.unwrap().is_none());

        // Second delete and update of a missing id are silent no-ops
        server
            .get(&format!("/delete/{}", id))
            .await
            .assert_status_see_other();
        server
            .post(&format!("/update/{}", id))
            .form(&product_form("Ghost", "Acme", "1"))
            .await
            .assert_status_see_other();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_edit_missing_product_is_not_found() {
        let (server, _) = signed_in().await;

        let response = server.get("/edit/999").await;
        response.assert_status_not_found();
        assert!(response.text().contains("404"));
    }

    #[tokio::test]
    async fn test_seeded_catalog_scenario() {
        let (server, store) = signed_in().await;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "product,category,sub_category,brand,sale_price,market_price,type,rating,description"
        )
        .unwrap();
        writeln!(file, "Tea,Beverages,Tea,Acme,10,12,Green Tea,4.0,Leaves").unwrap();
        writeln!(file, "Rice,Foodgrains,Rice,Acme,50,60,Basmati,3.0,Grain").unwrap();
        writeln!(file, "Salt,Foodgrains,Salt,Zeta,5,6,Salt,5.0,Iodised").unwrap();
        file.flush().unwrap();

        let summary = SeedService::new(store.clone())
            .import_if_empty(file.path())
            .await
            .unwrap();
        assert_eq!(summary.imported, 3);

        server
            .post("/add")
            .form(&product_form("Coffee", "Zeta", "4.0"))
            .await
            .assert_status_see_other();

        let response = server.get("/api/products?page=1").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], 4);
        let names: Vec<&str> = body["data"]["products"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["product"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Tea", "Rice", "Salt", "Coffee"]);

        let dashboard: Value = server.get("/api/dashboard").await.json();
        assert_eq!(dashboard["data"]["total_products"], 4);
        assert_eq!(dashboard["data"]["top_brand"], "Acme");
        assert_eq!(dashboard["data"]["avg_rating"], 4.0);

        let page = server.get("/dashboard").await;
        page.assert_status_ok();
        assert!(page.text().contains("Plotly.newPlot(\"dashboard-chart-1\""));
    }

    #[tokio::test]
    async fn test_stats_page_renders_four_charts() {
        let (server, _) = signed_in().await;
        server
            .post("/add")
            .form(&product_form("Assam", "Acme", "3.5"))
            .await;

        let html = server.get("/stats").await.text();
        assert!(html.contains("stats-chart-4"));

        let stats: Value = server.get("/api/stats").await.json();
        assert_eq!(stats["data"]["charts"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_malformed_page_params_render_error_page() {
        let (server, _) = signed_in().await;

        for path in ["/view_data?page=abc", "/edit/abc", "/delete/abc"] {
            let response = server.get(path).await;
            response.assert_status(StatusCode::BAD_REQUEST);
            assert!(response.text().contains("400"), "{}", path);
        }

        // Absurdly large pages stay in range
        server
            .get("/view_data?page=9223372036854775807")
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_api_missing_product_is_404() {
        let (server, _) = signed_in().await;

        let response = server.get("/api/products/42").await;
        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!(body["message"], "Product 42 not found");
    }
}
