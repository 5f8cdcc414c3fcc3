use alice_architecture::model::AggregateRoot;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Compute instance as returned by the instance store.
///
/// Lifecycle timestamps are kept in their stored textual form and parsed when
/// the instance is metered, so a malformed value fails the report instead of
/// the fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, AggregateRoot)]
#[serde(rename_all = "camelCase")]
pub struct InstanceRecord {
    pub id: Uuid,
    /// Owning tenant (project).
    pub tenant_id: String,
    pub user_id: String,
    /// Key into the resource shape catalog.
    pub resource_shape_ref: String,
    /// Descriptive only; metering uses the resource shape's vcpus.
    pub vcpus: u32,
    pub hostname: String,
    pub display_name: String,
    pub display_description: Option<String>,
    pub image_id: Option<String>,
    pub os_type: Option<String>,
    /// Compute host the instance is scheduled on.
    pub host: Option<String>,
    /// Raw lifecycle state, e.g. `running`, `building`.
    pub state_description: String,
    /// Absent when the instance never started.
    pub launched_at: Option<String>,
    /// Absent while the instance is still running.
    pub terminated_at: Option<String>,
}
