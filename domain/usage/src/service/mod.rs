mod usage_report;

pub use usage_report::UsageReportService;
