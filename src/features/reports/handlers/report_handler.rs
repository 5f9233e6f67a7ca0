use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::reports::dtos::{DashboardSummaryDto, StatisticsDto};
use crate::features::reports::handlers::ReportState;
use crate::shared::types::ApiResponse;

/// Dashboard figures and chart specs
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<DashboardSummaryDto>),
        (status = 401, description = "Session not signed in")
    ),
    security(("session_cookie" = [])),
    tag = "reports"
)]
pub async fn get_dashboard(
    State(state): State<ReportState>,
) -> Result<Json<ApiResponse<DashboardSummaryDto>>> {
    let summary = state.report_service.dashboard_summary().await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}

/// All four statistics charts with their underlying figures
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Catalog statistics", body = ApiResponse<StatisticsDto>),
        (status = 401, description = "Session not signed in")
    ),
    security(("session_cookie" = [])),
    tag = "reports"
)]
pub async fn get_statistics(
    State(state): State<ReportState>,
) -> Result<Json<ApiResponse<StatisticsDto>>> {
    let statistics = state.report_service.full_statistics().await?;
    Ok(Json(ApiResponse::success(Some(statistics), None, None)))
}
