//! Usage report service.

use async_trait::async_trait;

use crate::{
    exception::UsageResult,
    model::vo::{ReportingWindow, TenantUsageSummary},
};

#[async_trait]
/// Usage report service.
pub trait UsageReportService: Send + Sync {
    /// Usage of every tenant with instances in `window`, ordered by tenant id.
    async fn list_usage(&self, window: &ReportingWindow) -> UsageResult<Vec<TenantUsageSummary>>;

    /// Usage of one tenant. A tenant without usage gets an all-zero summary.
    async fn get_usage(
        &self,
        tenant_id: &str,
        window: &ReportingWindow,
    ) -> UsageResult<TenantUsageSummary>;
}
