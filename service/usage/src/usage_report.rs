use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use domain_usage::{
    exception::UsageResult,
    model::{
        entity::{InstanceRecord, ResourceShape},
        vo::{ReportingWindow, TenantUsageSummary},
    },
    repository::{InstanceFilter, InstanceRecordRepo, ResourceShapeRepo},
    service::UsageReportService,
};
use tracing::{debug, warn};
use typed_builder::TypedBuilder;

use crate::{aggregator::UsageAggregator, config::UsageConfig};

#[derive(TypedBuilder)]
pub struct UsageReportServiceImpl {
    instance_repo: Arc<dyn InstanceRecordRepo>,
    shape_repo: Arc<dyn ResourceShapeRepo>,
    #[builder(default)]
    config: UsageConfig,
}

impl UsageReportServiceImpl {
    async fn fetch_instances(
        &self,
        window: &ReportingWindow,
        tenant_id: Option<&str>,
    ) -> UsageResult<Vec<InstanceRecord>> {
        let filter = InstanceFilter {
            active_in: self.config.pre_filter_by_window.then_some(*window),
            tenant_id: tenant_id.map(str::to_owned),
        };
        let records = self.instance_repo.list_instances(&filter).await?;
        debug!("Fetched {} instance records", records.len());
        Ok(records)
    }

    /// Looks up every distinct shape reference once, in record order. Stops at
    /// the first unknown reference, which the aggregator then reports.
    async fn resolve_shapes(
        &self,
        records: &[InstanceRecord],
    ) -> UsageResult<HashMap<String, ResourceShape>> {
        let mut shapes = HashMap::new();
        for record in records {
            let shape_ref = &record.resource_shape_ref;
            if shapes.contains_key(shape_ref) {
                continue;
            }
            match self.shape_repo.get_resource_shape(shape_ref).await? {
                Some(shape) => {
                    shapes.insert(shape_ref.to_owned(), shape);
                }
                None => {
                    warn!("No resource shape with reference: {shape_ref}, instance: {}", record.id);
                    break;
                }
            }
        }
        Ok(shapes)
    }

    fn aggregator(&self, window: &ReportingWindow) -> UsageAggregator {
        UsageAggregator::builder()
            .window(*window)
            .now(Utc::now())
            .accounting(self.config.active_accounting)
            .build()
    }
}

#[async_trait]
impl UsageReportService for UsageReportServiceImpl {
    #[tracing::instrument(skip(self))]
    async fn list_usage(&self, window: &ReportingWindow) -> UsageResult<Vec<TenantUsageSummary>> {
        let records = self.fetch_instances(window, None).await?;
        let shapes = self.resolve_shapes(&records).await?;
        let summaries = self.aggregator(window).aggregate(&records, |r| shapes.get(r))?;
        debug!("Aggregated usage of {} tenants", summaries.len());
        Ok(summaries)
    }

    #[tracing::instrument(skip(self))]
    async fn get_usage(
        &self,
        tenant_id: &str,
        window: &ReportingWindow,
    ) -> UsageResult<TenantUsageSummary> {
        let records = self.fetch_instances(window, Some(tenant_id)).await?;
        let shapes = self.resolve_shapes(&records).await?;
        self.aggregator(window).aggregate_tenant(tenant_id, &records, |r| shapes.get(r))
    }
}
