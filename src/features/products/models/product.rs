use sqlx::FromRow;

/// Database model for a catalog product
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub product_id: i64,
    pub product: String,
    pub category: String,
    pub sub_category: String,
    pub brand: String,
    pub sale_price: f64,
    pub market_price: f64,
    #[sqlx(rename = "type")]
    pub product_type: String,
    /// Seed rows may omit the rating; forms always supply one
    pub rating: Option<f64>,
    pub description: String,
}

/// Every mutable product field, already validated.
///
/// Used for both insert and full-record update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub product: String,
    pub category: String,
    pub sub_category: String,
    pub brand: String,
    pub sale_price: f64,
    pub market_price: f64,
    pub product_type: String,
    pub rating: Option<f64>,
    pub description: String,
}

/// Text columns that can be grouped or listed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum TextField {
    Product,
    Category,
    SubCategory,
    Brand,
    Type,
}

impl TextField {
    pub fn column(self) -> &'static str {
        match self {
            TextField::Product => "product",
            TextField::Category => "category",
            TextField::SubCategory => "sub_category",
            TextField::Brand => "brand",
            TextField::Type => "type",
        }
    }
}

/// Numeric columns that can be averaged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum NumericField {
    SalePrice,
    MarketPrice,
    Rating,
}

impl NumericField {
    pub fn column(self) -> &'static str {
        match self {
            NumericField::SalePrice => "sale_price",
            NumericField::MarketPrice => "market_price",
            NumericField::Rating => "rating",
        }
    }
}
