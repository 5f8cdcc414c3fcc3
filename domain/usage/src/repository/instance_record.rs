use async_trait::async_trait;

use crate::model::{entity::InstanceRecord, vo::ReportingWindow};

/// Pre-filter the instance store may apply before returning records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceFilter {
    /// Only instances whose lifecycle could overlap this window.
    pub active_in: Option<ReportingWindow>,
    /// Only instances owned by this tenant.
    pub tenant_id: Option<String>,
}

#[async_trait]
pub trait InstanceRecordRepo: Send + Sync {
    /// List instances matching `filter`.
    ///
    /// Implementations may return instances that do not overlap the window;
    /// they meter to zero hours.
    async fn list_instances(&self, filter: &InstanceFilter) -> anyhow::Result<Vec<InstanceRecord>>;
}
