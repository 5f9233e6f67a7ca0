use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::reports::analytics::{BoxSummary, HistogramBin};
use crate::features::reports::charts::ChartSpec;

/// Mean sale price of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryPriceDto {
    pub category: String,
    pub mean_sale_price: f64,
}

/// Number of products carrying one brand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BrandCountDto {
    pub brand: String,
    pub count: i64,
}

/// Headline figures for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummaryDto {
    pub total_products: i64,
    /// Mean of recorded ratings, two decimals; absent when nothing is rated
    pub avg_rating: Option<f64>,
    /// Most frequent brand; ties go to the brand seen first
    pub top_brand: Option<String>,
    /// Descending by mean
    pub category_prices: Vec<CategoryPriceDto>,
    /// At most ten brands, most frequent first
    pub top_brands: Vec<BrandCountDto>,
    /// Category price bar, then brand pie
    pub charts: Vec<ChartSpec>,
}

/// Full statistics page data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatisticsDto {
    pub category_prices: Vec<CategoryPriceDto>,
    pub top_brands: Vec<BrandCountDto>,
    pub rating_histogram: Vec<HistogramBin>,
    pub price_spread: Vec<BoxSummary>,
    /// Category price bar, brand pie, rating histogram, price box plot
    pub charts: Vec<ChartSpec>,
}
