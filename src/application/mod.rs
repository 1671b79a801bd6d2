pub mod dashboard;
pub mod dashboard_service;

pub use dashboard::*;
pub use dashboard_service::{DashboardService, FetchedSeries};
