//! Folds instance records into per-tenant usage summaries.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use domain_usage::{
    exception::{UsageException, UsageResult},
    model::{
        entity::{InstanceRecord, ResourceShape},
        vo::{
            ActiveAccounting, Lifecycle, ReportingWindow, TenantUsageSummary, UsageLine,
            TERMINATED_STATE,
        },
    },
};
use typed_builder::TypedBuilder;

/// One aggregation pass over already fetched records.
///
/// Holds no state between calls; every [`UsageAggregator::aggregate`] starts
/// from fresh accumulators.
#[derive(TypedBuilder, Debug, Clone)]
pub struct UsageAggregator {
    window: ReportingWindow,
    /// Report time, used for uptime of running instances.
    now: DateTime<Utc>,
    #[builder(default, setter(strip_option, into))]
    tenant_filter: Option<String>,
    #[builder(default)]
    accounting: ActiveAccounting,
}

impl UsageAggregator {
    /// Meters every record and groups the lines by tenant, ordered by tenant
    /// id. Fails as a whole on the first unknown shape or malformed timestamp.
    pub fn aggregate<'a, F>(
        &self,
        records: &[InstanceRecord],
        shape_lookup: F,
    ) -> UsageResult<Vec<TenantUsageSummary>>
    where
        F: Fn(&str) -> Option<&'a ResourceShape>,
    {
        let mut summaries: BTreeMap<String, TenantUsageSummary> = BTreeMap::new();
        for record in records {
            let shape = shape_lookup(&record.resource_shape_ref).ok_or_else(|| {
                UsageException::UnknownResourceShape {
                    shape_ref: record.resource_shape_ref.clone(),
                }
            })?;
            let line = self.meter(record, shape)?;
            if self.tenant_filter.as_ref().is_some_and(|t| t != &record.tenant_id) {
                continue;
            }
            summaries
                .entry(record.tenant_id.clone())
                .or_insert_with(|| TenantUsageSummary::empty(&record.tenant_id, &self.window))
                .add_line(line, self.accounting);
        }
        Ok(summaries.into_values().collect())
    }

    /// Like [`UsageAggregator::aggregate`] for a single tenant, falling back to
    /// an all-zero summary when none of its instances are in `records`.
    pub fn aggregate_tenant<'a, F>(
        &self,
        tenant_id: &str,
        records: &[InstanceRecord],
        shape_lookup: F,
    ) -> UsageResult<TenantUsageSummary>
    where
        F: Fn(&str) -> Option<&'a ResourceShape>,
    {
        let scoped = Self {
            tenant_filter: Some(tenant_id.to_owned()),
            ..self.clone()
        };
        Ok(scoped
            .aggregate(records, shape_lookup)?
            .into_iter()
            .next()
            .unwrap_or_else(|| TenantUsageSummary::empty(tenant_id, &self.window)))
    }

    fn meter(&self, record: &InstanceRecord, shape: &ResourceShape) -> UsageResult<UsageLine> {
        let lifecycle = Lifecycle::from_record(record)?;
        let state = if lifecycle.is_terminated() {
            TERMINATED_STATE.to_owned()
        } else {
            record.state_description.clone()
        };
        Ok(UsageLine {
            instance_id: record.id,
            tenant_id: record.tenant_id.clone(),
            user_id: record.user_id.clone(),
            name: record.display_name.clone(),
            hostname: record.hostname.clone(),
            host: record.host.clone(),
            flavor: shape.name.clone(),
            vcpus: shape.vcpus,
            memory_mb: shape.memory_size_mb,
            local_gb: shape.disk_size_gb,
            started_at: lifecycle.launched_at,
            ended_at: lifecycle.terminated_at,
            uptime: lifecycle.uptime(self.now).num_seconds(),
            hours: lifecycle.billable_hours(&self.window),
            state,
        })
    }
}
