use axum::{extract::State, response::Html};
use minijinja::{context, Value};

use crate::core::error::PageResult;
use crate::features::reports::charts::ChartSpec;
use crate::features::reports::handlers::ReportState;
use crate::features::session::Session;
use crate::shared::templates::{chart_fragment, render_page};

fn chart_fragments(prefix: &str, charts: &[ChartSpec]) -> Vec<Value> {
    charts
        .iter()
        .enumerate()
        .map(|(i, chart)| chart_fragment(chart.render_fragment(&format!("{}-{}", prefix, i + 1))))
        .collect()
}

/// Summary cards plus the category price and brand charts
pub async fn dashboard(
    session: Session,
    State(state): State<ReportState>,
) -> PageResult<Html<String>> {
    let summary = state.report_service.dashboard_summary().await?;

    let html = render_page(
        "dashboard.html",
        context! {
            total_products => summary.total_products,
            avg_rating => summary.avg_rating,
            top_brand => summary.top_brand,
            graphs => chart_fragments("dashboard-chart", &summary.charts),
            ..session.page_context().await
        },
    )?;

    Ok(Html(html))
}

pub async fn stats(
    session: Session,
    State(state): State<ReportState>,
) -> PageResult<Html<String>> {
    let statistics = state.report_service.full_statistics().await?;

    let html = render_page(
        "stats.html",
        context! {
            graphs => chart_fragments("stats-chart", &statistics.charts),
            ..session.page_context().await
        },
    )?;

    Ok(Html(html))
}
