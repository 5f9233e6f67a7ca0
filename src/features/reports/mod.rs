pub mod analytics;
pub mod charts;
pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::ReportService;
