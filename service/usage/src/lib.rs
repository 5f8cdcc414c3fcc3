mod aggregator;
mod config;
mod usage_report;

pub use aggregator::UsageAggregator;
pub use config::UsageConfig;
pub use usage_report::UsageReportServiceImpl;
