mod catalog_service;
mod seed_service;

pub use catalog_service::CatalogService;
pub use seed_service::{SeedService, SeedSummary};
