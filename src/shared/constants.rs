/// Products shown per page of the catalog table
pub const PAGE_SIZE: i64 = 20;

/// Number of page links shown on each side of the current page
pub const PAGE_WINDOW: i64 = 2;

// =============================================================================
// REPORTING
// =============================================================================

/// Brands shown in the brand-frequency pie
pub const TOP_BRANDS: usize = 10;

/// Equal-width bins in the rating histogram
pub const RATING_HISTOGRAM_BINS: usize = 10;

/// Flash notice shown after a product is created
pub const NOTICE_PRODUCT_ADDED: &str = "Product added successfully!";

/// Flash notice shown after a product is updated
pub const NOTICE_PRODUCT_UPDATED: &str = "Product updated successfully!";

/// Flash notice shown after a product is deleted
pub const NOTICE_PRODUCT_DELETED: &str = "Product deleted.";
