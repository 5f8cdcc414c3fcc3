mod lifecycle;
mod timestamp;
mod usage;
mod window;

#[rustfmt::skip]
pub use {
    lifecycle::Lifecycle,
    timestamp::{parse_timestamp, parse_optional_timestamp, ACCEPTED_FORMATS},
    usage::{ActiveAccounting, TenantUsageSummary, UsageLine, TERMINATED_STATE},
    window::ReportingWindow,
};
