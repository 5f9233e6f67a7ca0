mod page_handler;
mod report_handler;

use std::sync::Arc;

use crate::features::reports::services::ReportService;

pub use page_handler::*;
pub use report_handler::*;

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub report_service: Arc<ReportService>,
}
