pub mod chart_service;
pub mod comparison_service;
pub mod delta_service;
pub mod report_service;
pub mod series_service;
