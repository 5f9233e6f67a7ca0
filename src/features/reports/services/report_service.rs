use crate::core::error::Result;
use crate::features::products::models::{NumericField, TextField};
use crate::features::products::store::ProductStore;
use crate::features::reports::analytics::{box_summaries, histogram, round2};
use crate::features::reports::charts::{ChartSpec, DASHBOARD_PIE_COLORS, STATS_PIE_COLORS};
use crate::features::reports::dtos::{
    BrandCountDto, CategoryPriceDto, DashboardSummaryDto, StatisticsDto,
};
use crate::shared::constants::{RATING_HISTOGRAM_BINS, TOP_BRANDS};

/// Read-only aggregate views over the whole catalog
pub struct ReportService {
    store: ProductStore,
}

impl ReportService {
    pub fn new(store: ProductStore) -> Self {
        Self { store }
    }

    async fn category_prices(&self) -> Result<Vec<CategoryPriceDto>> {
        let groups = self
            .store
            .group_mean(TextField::Category, NumericField::SalePrice)
            .await?;

        Ok(groups
            .into_iter()
            .map(|g| CategoryPriceDto {
                category: g.value,
                mean_sale_price: g.mean,
            })
            .collect())
    }

    async fn brand_counts(&self) -> Result<Vec<BrandCountDto>> {
        let groups = self.store.group_count(TextField::Brand).await?;

        Ok(groups
            .into_iter()
            .map(|g| BrandCountDto {
                brand: g.value,
                count: g.count,
            })
            .collect())
    }

    pub async fn dashboard_summary(&self) -> Result<DashboardSummaryDto> {
        let total_products = self.store.count().await?;
        let avg_rating = self.store.average(NumericField::Rating).await?.map(round2);

        let mut brands = self.brand_counts().await?;
        let top_brand = brands.first().map(|b| b.brand.clone());
        brands.truncate(TOP_BRANDS);

        let category_prices = self.category_prices().await?;

        let charts = vec![
            category_bar("Avg Sale Price per Category", &category_prices),
            brand_pie(&brands, &DASHBOARD_PIE_COLORS),
        ];

        Ok(DashboardSummaryDto {
            total_products,
            avg_rating,
            top_brand,
            category_prices,
            top_brands: brands,
            charts,
        })
    }

    pub async fn full_statistics(&self) -> Result<StatisticsDto> {
        let category_prices = self.category_prices().await?;

        let mut top_brands = self.brand_counts().await?;
        top_brands.truncate(TOP_BRANDS);

        let products = self.store.list_all().await?;

        let ratings: Vec<f64> = products.iter().filter_map(|p| p.rating).collect();
        let rating_histogram = histogram(&ratings, RATING_HISTOGRAM_BINS);

        let price_spread = box_summaries(
            products
                .iter()
                .map(|p| (p.category.as_str(), p.sale_price)),
        );

        let charts = vec![
            category_bar("Average Sale Price per Category", &category_prices),
            brand_pie(&top_brands, &STATS_PIE_COLORS),
            ChartSpec::histogram(
                "Distribution of Product Ratings",
                &rating_histogram,
                "rating",
            ),
            ChartSpec::box_plot(
                "Sale Price Spread by Category",
                &price_spread,
                ("category", "sale_price"),
            ),
        ];

        tracing::debug!(
            "Statistics computed over {} products ({} rated)",
            products.len(),
            ratings.len()
        );

        Ok(StatisticsDto {
            category_prices,
            top_brands,
            rating_histogram,
            price_spread,
            charts,
        })
    }
}

fn category_bar(title: &str, prices: &[CategoryPriceDto]) -> ChartSpec {
    ChartSpec::bar(
        title,
        prices.iter().map(|p| p.category.clone()).collect(),
        prices.iter().map(|p| p.mean_sale_price).collect(),
        ("category", "sale_price"),
    )
}

fn brand_pie(brands: &[BrandCountDto], colors: &[&str]) -> ChartSpec {
    ChartSpec::pie(
        "Top 10 Brand Distribution",
        brands.iter().map(|b| b.brand.clone()).collect(),
        brands.iter().map(|b| b.count).collect(),
        colors,
    )
}
