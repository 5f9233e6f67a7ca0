use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::ReportService;

/// Dashboard and statistics pages (session gating applied by caller)
pub fn page_routes(report_service: Arc<ReportService>) -> Router {
    let state = ReportState { report_service };

    Router::new()
        .route(
            "/dashboard",
            get(handlers::dashboard).post(handlers::dashboard),
        )
        .route("/stats", get(handlers::stats))
        .with_state(state)
}

pub fn api_routes(report_service: Arc<ReportService>) -> Router {
    let state = ReportState { report_service };

    Router::new()
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/stats", get(handlers::get_statistics))
        .with_state(state)
}
