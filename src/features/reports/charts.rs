//! Plotly figure specifications and their embeddable HTML fragments.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::features::reports::analytics::{BoxSummary, HistogramBin};

pub const BAR_COLOR: &str = "#FDBA74";
pub const TEXT_COLOR: &str = "#1F2937";
const TRANSPARENT: &str = "rgba(0,0,0,0)";

/// Deep oranges used for the dashboard's brand pie
pub const DASHBOARD_PIE_COLORS: [&str; 10] = [
    "#FED7AA", "#FDBA74", "#FB923C", "#F97316", "#EA580C", "#C2410C", "#9A3412", "#7C2D12",
    "#78350F", "#5A1E0C",
];

/// Pale peach tones used for the statistics page's brand pie
pub const STATS_PIE_COLORS: [&str; 10] = [
    "#FDBA74", "#FCD9A0", "#FFE0B2", "#FFEDD5", "#FEC89A", "#FEF3C7", "#FFDAB9", "#FFE6CC",
    "#FFDEAD", "#FFF3E0",
];

/// One Plotly figure: trace list plus layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartSpec {
    pub data: Vec<Value>,
    pub layout: Value,
}

fn layout(title: &str, x_title: Option<&str>, y_title: Option<&str>) -> Value {
    let mut layout = json!({
        "title": { "text": title },
        "paper_bgcolor": TRANSPARENT,
        "plot_bgcolor": TRANSPARENT,
        "font": { "color": TEXT_COLOR },
    });

    if let Some(x) = x_title {
        layout["xaxis"] = json!({ "title": { "text": x } });
    }
    if let Some(y) = y_title {
        layout["yaxis"] = json!({ "title": { "text": y } });
    }

    layout
}

impl ChartSpec {
    pub fn bar(title: &str, labels: Vec<String>, values: Vec<f64>, axes: (&str, &str)) -> Self {
        Self {
            data: vec![json!({
                "type": "bar",
                "x": labels,
                "y": values,
                "marker": { "color": BAR_COLOR },
            })],
            layout: layout(title, Some(axes.0), Some(axes.1)),
        }
    }

    pub fn pie(title: &str, labels: Vec<String>, values: Vec<i64>, colors: &[&str]) -> Self {
        Self {
            data: vec![json!({
                "type": "pie",
                "labels": labels,
                "values": values,
                "marker": { "colors": colors },
            })],
            layout: layout(title, None, None),
        }
    }

    /// Pre-binned histogram drawn as touching bars
    pub fn histogram(title: &str, bins: &[HistogramBin], x_title: &str) -> Self {
        let centers: Vec<f64> = bins.iter().map(|b| (b.start + b.end) / 2.0).collect();
        let widths: Vec<f64> = bins.iter().map(|b| b.end - b.start).collect();
        let counts: Vec<u64> = bins.iter().map(|b| b.count).collect();

        let mut layout = layout(title, Some(x_title), Some("count"));
        layout["bargap"] = json!(0);

        Self {
            data: vec![json!({
                "type": "bar",
                "x": centers,
                "y": counts,
                "width": widths,
                "marker": { "color": BAR_COLOR },
            })],
            layout,
        }
    }

    /// Box plot from precomputed statistics, with outliers as a separate marker trace
    pub fn box_plot(title: &str, summaries: &[BoxSummary], axes: (&str, &str)) -> Self {
        let groups: Vec<&str> = summaries.iter().map(|s| s.group.as_str()).collect();

        let mut data = vec![json!({
            "type": "box",
            "x": groups,
            "q1": summaries.iter().map(|s| s.q1).collect::<Vec<_>>(),
            "median": summaries.iter().map(|s| s.median).collect::<Vec<_>>(),
            "q3": summaries.iter().map(|s| s.q3).collect::<Vec<_>>(),
            "lowerfence": summaries.iter().map(|s| s.lower_whisker).collect::<Vec<_>>(),
            "upperfence": summaries.iter().map(|s| s.upper_whisker).collect::<Vec<_>>(),
            "marker": { "color": BAR_COLOR },
            "name": axes.1,
        })];

        let (outlier_x, outlier_y): (Vec<&str>, Vec<f64>) = summaries
            .iter()
            .flat_map(|s| s.outliers.iter().map(move |v| (s.group.as_str(), *v)))
            .unzip();

        if !outlier_y.is_empty() {
            data.push(json!({
                "type": "scatter",
                "mode": "markers",
                "x": outlier_x,
                "y": outlier_y,
                "marker": { "color": BAR_COLOR },
                "name": "outliers",
                "showlegend": false,
            }));
        }

        Self {
            data,
            layout: layout(title, Some(axes.0), Some(axes.1)),
        }
    }

    /// `<div>` plus inline `<script>` that draws this figure into `dom_id`
    pub fn render_fragment(&self, dom_id: &str) -> String {
        // JSON can carry "</script>" inside user text; break the closing tag
        let data = serde_json::to_string(&self.data)
            .unwrap_or_else(|_| "[]".to_string())
            .replace("</", "<\\/");
        let layout = serde_json::to_string(&self.layout)
            .unwrap_or_else(|_| "{}".to_string())
            .replace("</", "<\\/");

        format!(
            "<div id=\"{id}\" class=\"chart\"></div>\n\
             <script>Plotly.newPlot(\"{id}\", {data}, {layout}, {{\"responsive\": true}});</script>",
            id = dom_id,
            data = data,
            layout = layout,
        )
    }

    #[cfg(test)]
    pub fn title(&self) -> Option<&str> {
        self.layout["title"]["text"].as_str()
    }
}
